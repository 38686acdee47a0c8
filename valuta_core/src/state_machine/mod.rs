//! Per-chat conversation state machine.
//!
//! `transition` is pure: it maps the current state and an incoming event to
//! the next state plus the effects the engine has to carry out.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Action, Command, Event};
pub use state::ConversationState;
pub use transition::{Transition, transition};
