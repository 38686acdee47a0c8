//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::menu::Menu;
use crate::{Amount, Currency, MAX_AMOUNT};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::Usd),
        Just(Currency::Eur),
        Just(Currency::Uah),
    ]
}

fn arb_amount() -> impl Strategy<Value = Amount> {
    (0.01f64..=MAX_AMOUNT).prop_filter_map("valid amount", |v| Amount::try_from(v).ok())
}

fn arb_state() -> impl Strategy<Value = ConversationState> {
    prop_oneof![
        Just(ConversationState::Idle),
        arb_currency().prop_map(|base| ConversationState::BaseSelected { base }),
        (arb_currency(), arb_amount())
            .prop_map(|(base, amount)| ConversationState::AmountEntered { base, amount }),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::StartConversion),
        Just(Action::ContinueConversion),
        Just(Action::ShowInstruction),
        Just(Action::ReturnMain),
        arb_currency().prop_map(Action::SelectBase),
        arb_currency().prop_map(Action::SelectTarget),
    ]
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::Help),
        Just(Command::History),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_command(), proptest::option::of("[A-Za-z]{1,10}"))
            .prop_map(|(command, first_name)| Event::Command { command, first_name }),
        arb_action().prop_map(Event::Action),
        "[0-9a-z,. -]{0,12}".prop_map(Event::Text),
        (arb_currency(), 0.0001f64..1000.0)
            .prop_map(|(target, rate)| Event::RateResolved { target, rate }),
        arb_currency().prop_map(|target| Event::RateUnavailable { target }),
    ]
}

/// Amounts that must be refused: non-positive, too large, or not numbers.
fn arb_invalid_amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1e9f64..=0.0).prop_map(|v| v.to_string()),
        ((MAX_AMOUNT + 1.0)..1e15f64).prop_map(|v| v.to_string()),
        "[a-zA-Z]{1,8}",
        Just("nan".to_string()),
        Just("-inf".to_string()),
        Just(String::new()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn valid_amount_is_stored_exactly(base in arb_currency(), value in 0.01f64..=MAX_AMOUNT) {
        let state = ConversationState::BaseSelected { base };
        let amount = Amount::try_from(value).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let step = transition(&state, Event::Text(value.to_string()));
        prop_assert_eq!(step.state, ConversationState::AmountEntered { base, amount });
    }

    #[test]
    fn invalid_amount_leaves_state_and_reprompts(
        state in arb_state(),
        input in arb_invalid_amount_text(),
    ) {
        let step = transition(&state, Event::Text(input));
        prop_assert_eq!(step.state, state);
        prop_assert_eq!(step.effects.len(), 1);
        prop_assert!(matches!(&step.effects[0], Effect::Reply(_)));
    }

    #[test]
    fn return_main_always_clears(state in arb_state()) {
        let step = transition(&state, Event::Action(Action::ReturnMain));
        prop_assert!(step.state.is_idle());
        let next = transition(&step.state, Event::Text("10".to_string()));
        prop_assert!(next.state.is_idle());
    }

    #[test]
    fn target_menus_exclude_base(state in arb_state(), event in arb_event()) {
        let step = transition(&state, event);
        for reply in step.replies() {
            if let Some(Menu::TargetCurrencies { base }) = reply.menu {
                let offered = Menu::TargetCurrencies { base }.options();
                prop_assert!(!offered.iter().any(|(_, a)| *a == Action::SelectTarget(base)));
                prop_assert_eq!(step.state.base(), Some(base));
            }
        }
    }

    #[test]
    fn records_only_follow_a_complete_selection(state in arb_state(), event in arb_event()) {
        let step = transition(&state, event);
        for effect in &step.effects {
            if let Effect::AppendRecord(record) = effect {
                prop_assert_eq!(state.base(), Some(record.from));
                prop_assert_eq!(state.amount(), Some(record.amount));
                prop_assert_ne!(record.from, record.to);
                prop_assert!(step.state.is_idle());
            }
        }
    }

    #[test]
    fn selecting_a_target_never_changes_state(state in arb_state(), target in arb_currency()) {
        let step = transition(&state, Event::Action(Action::SelectTarget(target)));
        prop_assert_eq!(step.state, state);
    }

    #[test]
    fn rate_lookup_is_requested_only_from_amount_entered(
        state in arb_state(),
        event in arb_event(),
    ) {
        let step = transition(&state, event);
        for effect in &step.effects {
            if let Effect::FetchRate { base, target } = effect {
                let from_amount_entered = matches!(state, ConversationState::AmountEntered { .. });
                prop_assert!(from_amount_entered);
                prop_assert_eq!(state.base(), Some(*base));
                prop_assert_ne!(base, target);
            }
        }
    }

    #[test]
    fn choices_are_disabled_before_anything_else(state in arb_state(), action in arb_action()) {
        let step = transition(&state, Event::Action(action));
        if let Some(pos) = step.effects.iter().position(|e| *e == Effect::DisableChoices) {
            prop_assert_eq!(pos, 0);
        }
    }
}
