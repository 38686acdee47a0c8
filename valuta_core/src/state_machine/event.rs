//! Events that drive the conversation.

use crate::Currency;

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    History,
}

impl Command {
    /// `(name, description)` pairs for command registration.
    pub const ALL: [(&'static str, &'static str); 3] = [
        ("start", "Open the main menu"),
        ("help", "How to use the bot"),
        ("history", "Show recent conversions"),
    ];

    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();

        // Remove bot mention if present (e.g., "/start@my_bot")
        let command = text.split('@').next().unwrap_or(&text);

        match command {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/history" => Some(Self::History),
            _ => None,
        }
    }
}

/// A button press, decoded from its callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartConversion,
    ContinueConversion,
    ShowInstruction,
    ReturnMain,
    SelectBase(Currency),
    SelectTarget(Currency),
}

impl Action {
    /// Callback payload carried by the button.
    #[must_use]
    pub fn encode(self) -> String {
        match self {
            Self::StartConversion => "convert_currency".to_string(),
            Self::ContinueConversion => "continue_convert".to_string(),
            Self::ShowInstruction => "show_instruction".to_string(),
            Self::ReturnMain => "return_main".to_string(),
            Self::SelectBase(c) => format!("base:{}", c.code()),
            Self::SelectTarget(c) => format!("target:{}", c.code()),
        }
    }

    /// Inverse of [`Action::encode`]; `None` for anything unrecognised.
    #[must_use]
    pub fn decode(payload: &str) -> Option<Self> {
        match payload {
            "convert_currency" => return Some(Self::StartConversion),
            "continue_convert" => return Some(Self::ContinueConversion),
            "show_instruction" => return Some(Self::ShowInstruction),
            "return_main" => return Some(Self::ReturnMain),
            _ => {}
        }

        let (kind, code) = payload.split_once(':')?;
        let currency = code.parse().ok()?;
        match kind {
            "base" => Some(Self::SelectBase(currency)),
            "target" => Some(Self::SelectTarget(currency)),
            _ => None,
        }
    }
}

/// Input to [`transition`](super::transition).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Command {
        command: Command,
        first_name: Option<String>,
    },
    Action(Action),
    /// Free text; treated as an amount.
    Text(String),
    /// Outcome of a rate lookup requested by `Effect::FetchRate`.
    RateResolved { target: Currency, rate: f64 },
    RateUnavailable { target: Currency },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_mentions() {
        assert_eq!(Command::parse_from_text("/start"), Some(Command::Start));
        assert_eq!(
            Command::parse_from_text(" /HELP@valuta_bot "),
            Some(Command::Help)
        );
        assert_eq!(Command::parse_from_text("/history"), Some(Command::History));
        assert_eq!(Command::parse_from_text("/reset"), None);
        assert_eq!(Command::parse_from_text("100"), None);
    }

    #[test]
    fn payloads_decode_to_actions() {
        let actions = [
            Action::StartConversion,
            Action::ContinueConversion,
            Action::ShowInstruction,
            Action::ReturnMain,
            Action::SelectBase(Currency::Usd),
            Action::SelectTarget(Currency::Uah),
        ];
        for action in actions {
            assert_eq!(Action::decode(&action.encode()), Some(action));
        }
        assert_eq!(Action::encode(Action::SelectBase(Currency::Eur)), "base:EUR");
    }

    #[test]
    fn unknown_payloads_are_rejected() {
        assert_eq!(Action::decode(""), None);
        assert_eq!(Action::decode("base:GBP"), None);
        assert_eq!(Action::decode("swap:USD"), None);
        assert_eq!(Action::decode("base"), None);
    }
}
