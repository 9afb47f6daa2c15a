use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::{ResourceType, Sun};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeAction {
    Freeze,
    Unfreeze,
}

impl Display for StakeAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StakeAction::Freeze => f.write_str("stake"),
            StakeAction::Unfreeze => f.write_str("unstake"),
        }
    }
}

/// A staking request that passed input validation. Amounts are in Sun from
/// here on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedStake {
    pub action: StakeAction,
    pub amount: Sun,
    pub resource: ResourceType,
    pub owner: String,
    /// Same as `owner` for unfreeze and for self-stakes.
    pub receiver: String,
}

/// Sub-step of Validated → Submitted that can fail.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitStage {
    Build,
    Sign,
    Submit,
}

impl Display for SubmitStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitStage::Build => f.write_str("build"),
            SubmitStage::Sign => f.write_str("sign"),
            SubmitStage::Submit => f.write_str("submit"),
        }
    }
}

/// Phase of the single in-flight staking action.
///
/// `Draft → Validated → Submitted → Confirmed | Rejected`. A failure while
/// building, signing or transmitting goes back to `Draft`. `Confirmed` and
/// `Rejected` are terminal: the next action starts over as if from `Draft`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakePhase {
    #[default]
    Draft,
    Validated(ValidatedStake),
    Submitted {
        stake: ValidatedStake,
        tx_id: String,
    },
    Confirmed {
        stake: ValidatedStake,
        tx_id: String,
    },
    Rejected {
        stake: ValidatedStake,
        tx_id: String,
        reason: String,
    },
}

impl StakePhase {
    /// True when a new action may start from this phase.
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            StakePhase::Draft | StakePhase::Confirmed { .. } | StakePhase::Rejected { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            StakePhase::Draft => "draft",
            StakePhase::Validated(_) => "validated",
            StakePhase::Submitted { .. } => "submitted",
            StakePhase::Confirmed { .. } => "confirmed",
            StakePhase::Rejected { .. } => "rejected",
        }
    }
}
