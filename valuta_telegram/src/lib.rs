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

//! Telegram front-end for the conversion flow.

mod bot;
mod command;
mod error;
mod handler;
mod transport;

pub use bot::{BotEngine, TelegramBot};
pub use command::bot_commands;
pub use error::{Error, Result};
pub use transport::{TelegramTransport, keyboard, render_text};
