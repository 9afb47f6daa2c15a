use crate::context::*;
use trondeck::domain::*;
use trondeck::port::EventHandler;

#[test]
fn test_validated_from_draft() {
    let event = StakeValidated {
        stake: validated_stake(),
    };

    let phase = event.apply(&StakePhase::Draft).expect("Should apply from draft");

    assert_eq!(phase, StakePhase::Validated(validated_stake()));
}

#[test]
fn test_validated_after_terminal_phases() {
    let event = StakeValidated {
        stake: validated_stake(),
    };
    let confirmed = StakePhase::Confirmed {
        stake: validated_stake(),
        tx_id: "aa".to_string(),
    };
    let rejected = StakePhase::Rejected {
        stake: validated_stake(),
        tx_id: "bb".to_string(),
        reason: "no".to_string(),
    };

    assert!(event.apply(&confirmed).is_some(), "Confirmed starts over");
    assert!(event.apply(&rejected).is_some(), "Rejected starts over");
}

#[test]
fn test_validated_while_in_flight_fails() {
    let event = StakeValidated {
        stake: validated_stake(),
    };

    assert_eq!(event.apply(&submitted("aa")), None);
    assert_eq!(event.apply(&StakePhase::Validated(validated_stake())), None);
}
