use crate::context::*;
use trondeck::domain::*;
use trondeck::port::EventHandler;

#[test]
fn test_reverted_returns_to_draft() {
    let event = StakeReverted {
        stage: SubmitStage::Sign,
        reason: "bad key".to_string(),
    };

    assert_eq!(
        event.apply(&StakePhase::Validated(validated_stake())),
        Some(StakePhase::Draft)
    );
    assert_eq!(event.apply(&submitted("abc")), Some(StakePhase::Draft));
}

#[test]
fn test_reverted_needs_pending_action() {
    let event = StakeReverted {
        stage: SubmitStage::Build,
        reason: "node down".to_string(),
    };
    let confirmed = StakePhase::Confirmed {
        stake: validated_stake(),
        tx_id: "abc".to_string(),
    };

    assert_eq!(event.apply(&StakePhase::Draft), None);
    assert_eq!(event.apply(&confirmed), None);
}

#[test]
fn test_event_dispatch_matches_variant() {
    let event = StakeEvent::Reverted(StakeReverted {
        stage: SubmitStage::Submit,
        reason: "timeout".to_string(),
    });

    assert_eq!(
        event.apply(&StakePhase::Validated(validated_stake())),
        Some(StakePhase::Draft)
    );
}
