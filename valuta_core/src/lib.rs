#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Currency conversion conversations.
//!
//! A chat moves through `Idle -> BaseSelected -> AmountEntered` and back to
//! `Idle` once a conversion is reported. The transition function is pure;
//! [`ConversationEngine`] performs the effects it asks for against the
//! [`RateProvider`], [`ConversionLog`], [`SessionStore`] and
//! [`ChatTransport`] seams.

use thiserror::Error;

pub mod amount;
pub mod currency;
pub mod engine;
pub mod menu;
pub mod rates;
pub mod record;
pub mod session;
pub mod state_machine;

pub use amount::{Amount, AmountError, MAX_AMOUNT};
pub use currency::{Currency, UnknownCurrency};
pub use engine::{ChatTransport, ConversationEngine, Incoming};
pub use menu::{Menu, Reply};
pub use rates::{LookupFailure, RateProvider, RateTable};
pub use record::{ConversionLog, ConversionRecord, MAX_RECORDS};
pub use session::{ChatId, InMemorySessionStore, SessionStore};
pub use state_machine::{Action, Command, ConversationState, Effect, Event};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(anyhow::Error),
}
