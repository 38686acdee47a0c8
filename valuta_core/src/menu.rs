//! Transport-neutral replies and the option sets shown under them.

use crate::state_machine::Action;
use crate::{ConversionRecord, Currency};

const BACK_TO_MAIN: &str = "🔙 Back to main menu";

/// A set of selectable options attached to a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    /// Convert / instructions.
    Main,
    /// Every currency, to pick the one converted from.
    BaseCurrencies,
    /// Every currency except `base`.
    TargetCurrencies { base: Currency },
    /// Continue converting or go back.
    AfterConversion,
    /// Only the way back to the main menu.
    BackToMain,
}

impl Menu {
    /// Options in display order, one per row.
    #[must_use]
    pub fn options(self) -> Vec<(String, Action)> {
        let back = (BACK_TO_MAIN.to_string(), Action::ReturnMain);
        match self {
            Self::Main => vec![
                ("💱 Convert currency".to_string(), Action::StartConversion),
                ("📖 Instructions".to_string(), Action::ShowInstruction),
            ],
            Self::BaseCurrencies => Currency::ALL
                .into_iter()
                .map(|c| (c.label(), Action::SelectBase(c)))
                .chain(std::iter::once(back))
                .collect(),
            Self::TargetCurrencies { base } => Currency::targets_for(base)
                .map(|c| (c.label(), Action::SelectTarget(c)))
                .chain(std::iter::once(back))
                .collect(),
            Self::AfterConversion => vec![
                ("🔁 Continue".to_string(), Action::ContinueConversion),
                back,
            ],
            Self::BackToMain => vec![back],
        }
    }
}

/// A message to send to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Rendered with emphasis above `text`.
    pub heading: Option<String>,
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            heading: None,
            text: text.into(),
            menu: None,
        }
    }

    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    #[must_use]
    pub const fn with_menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    #[must_use]
    pub fn greeting(first_name: Option<&str>) -> Self {
        match first_name {
            Some(name) if !name.trim().is_empty() => Self::text(format!("👋 Hello, {name}!")),
            _ => Self::text("👋 Hello!"),
        }
    }

    #[must_use]
    pub fn main_menu() -> Self {
        Self::text("📌 This is a currency converter bot. Choose an action:").with_menu(Menu::Main)
    }

    #[must_use]
    pub fn instruction() -> Self {
        Self::text(
            "1. Press \"Convert currency\".\n\
             2. Choose a currency and enter the amount.\n\
             3. Choose the currency to convert to.\n\
             4. Get the result.\n\n\
             Enjoy!",
        )
        .with_heading("📌 How to use:")
        .with_menu(Menu::BackToMain)
    }

    #[must_use]
    pub fn choose_base() -> Self {
        Self::text("💰 Choose the source currency:").with_menu(Menu::BaseCurrencies)
    }

    #[must_use]
    pub fn enter_amount(base: Currency) -> Self {
        Self::text(format!("Selected {base}. Enter the amount to convert:"))
    }

    #[must_use]
    pub fn select_base_first() -> Self {
        Self::text("❗️ Please choose the source currency first.")
    }

    #[must_use]
    pub fn invalid_amount() -> Self {
        Self::text("❗️ Enter a valid amount.")
    }

    #[must_use]
    pub fn choose_target(base: Currency) -> Self {
        Self::text("🔄 Choose the currency to convert to:")
            .with_menu(Menu::TargetCurrencies { base })
    }

    #[must_use]
    pub fn conversion_result(record: &ConversionRecord) -> Self {
        Self::text(format!("✅ {record}"))
    }

    #[must_use]
    pub fn what_next() -> Self {
        Self::text("Choose what to do next:").with_menu(Menu::AfterConversion)
    }

    /// Generic lookup failure; the target menu is shown again so the user can retry.
    #[must_use]
    pub fn rate_unavailable(base: Currency) -> Self {
        Self::text("❌ Failed to fetch exchange rates.").with_menu(Menu::TargetCurrencies { base })
    }

    #[must_use]
    pub fn history(records: &[ConversionRecord]) -> Self {
        if records.is_empty() {
            return Self::text("No conversions yet.");
        }
        let lines = records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{}. {record}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        Self::text(lines).with_heading("🧾 Recent conversions:")
    }
}
