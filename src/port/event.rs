use crate::domain::StakePhase;

/// EventHandler moves the stake phase forward by one event.
///
/// `apply` is pure. It returns `None` when the event is not a legal
/// transition from the given phase.
pub trait EventHandler: Send {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase>;
}
