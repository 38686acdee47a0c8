//! Pure state transition function.

use super::{Action, Command, ConversationState, Effect, Event};
use crate::menu::Reply;
use crate::{Amount, ConversionRecord};

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ConversationState,
    pub effects: Vec<Effect>,
}

impl Transition {
    #[must_use]
    pub const fn new(state: ConversationState) -> Self {
        Self {
            state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn reply(self, reply: Reply) -> Self {
        self.with_effect(Effect::Reply(reply))
    }

    /// Disable the options the user just picked from.
    #[must_use]
    pub fn disable_choices(self) -> Self {
        self.with_effect(Effect::DisableChoices)
    }

    /// Replies shown to the user, in order.
    pub fn replies(&self) -> impl Iterator<Item = &Reply> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Reply(reply) => Some(reply),
            _ => None,
        })
    }
}

/// Compute the next state for `event`. Never performs I/O.
#[must_use]
pub fn transition(state: &ConversationState, event: Event) -> Transition {
    let unchanged = Transition::new(*state);

    match (state, event) {
        // Commands work in every state and never touch it.
        (
            _,
            Event::Command {
                command: Command::Start,
                first_name,
            },
        ) => unchanged
            .reply(Reply::greeting(first_name.as_deref()))
            .reply(Reply::main_menu()),
        (
            _,
            Event::Command {
                command: Command::Help,
                ..
            },
        ) => unchanged.reply(Reply::instruction()),
        (
            _,
            Event::Command {
                command: Command::History,
                ..
            },
        ) => unchanged.with_effect(Effect::ShowHistory),

        // Menu navigation.
        (_, Event::Action(Action::StartConversion | Action::ContinueConversion)) => {
            Transition::new(ConversationState::Idle)
                .disable_choices()
                .reply(Reply::choose_base())
        }
        (_, Event::Action(Action::ShowInstruction)) => {
            unchanged.disable_choices().reply(Reply::instruction())
        }
        (_, Event::Action(Action::ReturnMain)) => Transition::new(ConversationState::Idle)
            .disable_choices()
            .reply(Reply::main_menu()),

        // Idle -> BaseSelected, overwriting whatever was there.
        (_, Event::Action(Action::SelectBase(base))) => {
            Transition::new(ConversationState::BaseSelected { base })
                .disable_choices()
                .reply(Reply::enter_amount(base))
        }

        // AmountEntered stays put until the lookup outcome arrives.
        (
            ConversationState::AmountEntered { base, .. },
            Event::Action(Action::SelectTarget(target)),
        ) if target != *base => {
            unchanged
                .disable_choices()
                .with_effect(Effect::FetchRate {
                    base: *base,
                    target,
                })
        }
        (_, Event::Action(Action::SelectTarget(_)))
        | (ConversationState::Idle, Event::Text(_)) => unchanged.reply(Reply::select_base_first()),

        // BaseSelected -> AmountEntered; re-entering an amount replaces it.
        (
            ConversationState::BaseSelected { base }
            | ConversationState::AmountEntered { base, .. },
            Event::Text(text),
        ) => match Amount::parse(&text) {
            Ok(amount) => Transition::new(ConversationState::AmountEntered {
                base: *base,
                amount,
            })
            .reply(Reply::choose_target(*base)),
            Err(_) => unchanged.reply(Reply::invalid_amount()),
        },

        // AmountEntered -> terminal.
        (
            ConversationState::AmountEntered { base, amount },
            Event::RateResolved { target, rate },
        ) if target != *base => {
            let record = ConversionRecord::new(*base, target, *amount, rate);
            // The state is cleared before the result is sent. If that send
            // fails, the remaining effects (record included) are skipped.
            Transition::new(ConversationState::Idle)
                .reply(Reply::conversion_result(&record))
                .with_effect(Effect::AppendRecord(record))
                .reply(Reply::what_next())
        }
        (ConversationState::AmountEntered { base, .. }, Event::RateUnavailable { .. }) => {
            unchanged.reply(Reply::rate_unavailable(*base))
        }

        // A lookup outcome that no longer matches the state.
        (_, Event::RateResolved { .. } | Event::RateUnavailable { .. }) => unchanged,
    }
}
