use proptest::prelude::*;
use telos_wizard::{allowed_transitions, validate_transition, SectionId, WizardState};

#[test]
fn test_welcome_transitions() {
    assert!(validate_transition(WizardState::Welcome, WizardState::Section(SectionId::First)).is_ok());

    // Invalid
    assert!(validate_transition(WizardState::Welcome, WizardState::Section(SectionId::Second)).is_err());
    assert!(validate_transition(WizardState::Welcome, WizardState::Results).is_err());
}

#[test]
fn test_section_transitions() {
    use SectionId::*;
    use WizardState::*;

    assert!(validate_transition(Section(First), Section(Second)).is_ok());
    assert!(validate_transition(Section(Second), Section(First)).is_ok());
    assert!(validate_transition(Section(Second), Section(Third)).is_ok());
    assert!(validate_transition(Section(Third), Results).is_ok());

    // No skipping, no going back past the first section
    assert!(validate_transition(Section(First), Section(Third)).is_err());
    assert!(validate_transition(Section(First), Results).is_err());
    assert!(validate_transition(Section(First), Welcome).is_err());
}

#[test]
fn test_results_only_retakes() {
    assert_eq!(
        allowed_transitions(WizardState::Results),
        vec![WizardState::Section(SectionId::First)]
    );
    assert!(validate_transition(WizardState::Results, WizardState::Welcome).is_err());
}

fn any_state() -> impl Strategy<Value = WizardState> {
    prop_oneof![
        Just(WizardState::Welcome),
        Just(WizardState::Section(SectionId::First)),
        Just(WizardState::Section(SectionId::Second)),
        Just(WizardState::Section(SectionId::Third)),
        Just(WizardState::Results),
    ]
}

proptest! {
    #[test]
    fn prop_validation_matches_table(from in any_state(), to in any_state()) {
        let res = validate_transition(from, to);
        let allowed = allowed_transitions(from);

        if res.is_ok() {
            prop_assert!(allowed.contains(&to));
        } else {
            prop_assert!(!allowed.contains(&to));
        }
    }

    #[test]
    fn prop_no_self_transitions(state in any_state()) {
        prop_assert!(validate_transition(state, state).is_err());
    }
}
