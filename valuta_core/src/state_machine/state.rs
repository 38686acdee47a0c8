use crate::{Amount, Currency};

/// Where a chat is in the conversion flow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConversationState {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// Source currency chosen, waiting for the amount.
    BaseSelected { base: Currency },
    /// Amount entered, waiting for the target currency.
    AmountEntered { base: Currency, amount: Amount },
}

impl ConversationState {
    #[must_use]
    pub const fn base(&self) -> Option<Currency> {
        match self {
            Self::Idle => None,
            Self::BaseSelected { base } | Self::AmountEntered { base, .. } => Some(*base),
        }
    }

    #[must_use]
    pub const fn amount(&self) -> Option<Amount> {
        match self {
            Self::AmountEntered { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
