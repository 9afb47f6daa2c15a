use crate::domain::{StakeEvent, StakePhase};

/// Current phase handed to the stake engine.
#[derive(Debug, Clone, Default)]
pub struct StakeContext {
    pub current_phase: StakePhase,
}

/// What one stake/unstake run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeOutcome {
    /// Every event applied during the run, in order.
    pub events: Vec<StakeEvent>,
    /// Terminal phase: `Confirmed` or `Rejected`.
    pub phase: StakePhase,
}

impl StakeOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self.phase, StakePhase::Confirmed { .. })
    }
}
