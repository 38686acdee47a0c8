//! Supported currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency the bot can convert between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Uah,
}

impl Currency {
    /// Every supported currency, in menu order.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Eur, Self::Uah];

    /// ISO 4217 code, as used by the rate endpoint and the conversion log.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Uah => "UAH",
        }
    }

    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Usd => "🇺🇸",
            Self::Eur => "🇪🇺",
            Self::Uah => "🇺🇦",
        }
    }

    /// Button label, e.g. `🇺🇸 USD`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {}", self.flag(), self.code())
    }

    /// All currencies except `base`.
    pub fn targets_for(base: Self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |c| *c != base)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}
