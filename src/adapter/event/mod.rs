mod confirmed_handler;
mod rejected_handler;
mod reverted_handler;
mod submitted_handler;
mod validated_handler;

use crate::domain::{StakeEvent, StakePhase};
use crate::port::EventHandler;

impl EventHandler for StakeEvent {
    fn apply(&self, phase: &StakePhase) -> Option<StakePhase> {
        match self {
            StakeEvent::Validated(event) => event.apply(phase),
            StakeEvent::Submitted(event) => event.apply(phase),
            StakeEvent::Confirmed(event) => event.apply(phase),
            StakeEvent::Rejected(event) => event.apply(phase),
            StakeEvent::Reverted(event) => event.apply(phase),
        }
    }
}
