use crate::{
    domain::{StakePhase, StakeReverted},
    port::EventHandler,
};

/// A failed build, sign or submit drops the action back to draft. Nothing was
/// left half-submitted, so there is nothing else to undo.
impl EventHandler for StakeReverted {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase> {
        match phase {
            StakePhase::Validated(_) | StakePhase::Submitted { .. } => Some(StakePhase::Draft),
            _ => None,
        }
    }
}
