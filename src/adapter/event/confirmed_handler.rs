use crate::{
    domain::{StakeConfirmed, StakePhase},
    port::EventHandler,
};

impl EventHandler for StakeConfirmed {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase> {
        match phase {
            StakePhase::Submitted { stake, tx_id } if *tx_id == self.tx_id => {
                Some(StakePhase::Confirmed {
                    stake: stake.clone(),
                    tx_id: tx_id.clone(),
                })
            }
            _ => None,
        }
    }
}
