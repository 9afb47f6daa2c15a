use serde::{Deserialize, Serialize};

use crate::domain::{SubmitStage, ValidatedStake};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StakeEvent {
    Validated(StakeValidated),
    Submitted(StakeSubmitted),
    Confirmed(StakeConfirmed),
    Rejected(StakeRejected),
    Reverted(StakeReverted),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeValidated {
    pub stake: ValidatedStake,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSubmitted {
    pub tx_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeConfirmed {
    pub tx_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRejected {
    pub tx_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeReverted {
    pub stage: SubmitStage,
    pub reason: String,
}
