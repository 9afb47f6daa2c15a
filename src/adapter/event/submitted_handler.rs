use crate::{
    domain::{StakePhase, StakeSubmitted},
    port::EventHandler,
};

impl EventHandler for StakeSubmitted {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase> {
        match phase {
            StakePhase::Validated(stake) => Some(StakePhase::Submitted {
                stake: stake.clone(),
                tx_id: self.tx_id.clone(),
            }),
            _ => None,
        }
    }
}
