use serde::{Deserialize, Serialize};

use crate::domain::StakeAction;

/// A staking action as the user typed it.
///
/// The fields are the raw form inputs. They are kept after a rejected
/// submission so the user can retry, and cleared once the node acknowledges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StakeCommand {
    Freeze(Freeze),
    Unfreeze(Unfreeze),
}

impl StakeCommand {
    pub fn action(&self) -> StakeAction {
        match self {
            StakeCommand::Freeze(_) => StakeAction::Freeze,
            StakeCommand::Unfreeze(_) => StakeAction::Unfreeze,
        }
    }

    pub fn amount_trx(&self) -> f64 {
        match self {
            StakeCommand::Freeze(cmd) => cmd.amount_trx,
            StakeCommand::Unfreeze(cmd) => cmd.amount_trx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Lock TRX to obtain a resource allowance, optionally for another account.
///
/// A blank receiver means the wallet's own address. Any other receiver is
/// served by delegating TRX the wallet has already staked.
pub struct Freeze {
    pub amount_trx: f64,
    pub resource: String,
    pub receiver: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Release previously frozen TRX for a resource.
///
/// The resource type is required: the position to release is always named
/// explicitly.
pub struct Unfreeze {
    pub amount_trx: f64,
    pub resource: String,
}
