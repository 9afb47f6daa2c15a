use crate::{
    domain::{StakePhase, StakeRejected},
    port::EventHandler,
};

impl EventHandler for StakeRejected {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase> {
        match phase {
            StakePhase::Submitted { stake, tx_id } if *tx_id == self.tx_id => {
                Some(StakePhase::Rejected {
                    stake: stake.clone(),
                    tx_id: tx_id.clone(),
                    reason: self.reason.clone(),
                })
            }
            _ => None,
        }
    }
}
