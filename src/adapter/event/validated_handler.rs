use crate::{
    domain::{StakePhase, StakeValidated},
    port::EventHandler,
};

impl EventHandler for StakeValidated {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase> {
        phase
            .is_idle()
            .then(|| StakePhase::Validated(self.stake.clone()))
    }
}
