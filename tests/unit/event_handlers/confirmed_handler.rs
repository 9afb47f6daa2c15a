use crate::context::*;
use trondeck::domain::*;
use trondeck::port::EventHandler;

#[test]
fn test_confirmed_from_submitted() {
    let event = StakeConfirmed {
        tx_id: "abc".to_string(),
    };

    let phase = event.apply(&submitted("abc")).expect("Should confirm");

    assert_eq!(
        phase,
        StakePhase::Confirmed {
            stake: validated_stake(),
            tx_id: "abc".to_string(),
        }
    );
    assert!(phase.is_idle());
}

#[test]
fn test_confirmed_for_other_transaction_fails() {
    let event = StakeConfirmed {
        tx_id: "abc".to_string(),
    };

    assert_eq!(event.apply(&submitted("def")), None);
}

#[test]
fn test_confirmed_before_submission_fails() {
    let event = StakeConfirmed {
        tx_id: "abc".to_string(),
    };

    assert_eq!(event.apply(&StakePhase::Draft), None);
    assert_eq!(event.apply(&StakePhase::Validated(validated_stake())), None);
}
