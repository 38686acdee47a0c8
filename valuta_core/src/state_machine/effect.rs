use crate::menu::Reply;
use crate::{ConversionRecord, Currency};

/// Work the engine performs after a transition, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Remove the options from the message whose button was pressed.
    DisableChoices,

    /// Send a message to the chat.
    Reply(Reply),

    /// Look up rates for `base`; the outcome comes back as
    /// `Event::RateResolved` or `Event::RateUnavailable`.
    FetchRate { base: Currency, target: Currency },

    /// Persist a completed conversion.
    AppendRecord(ConversionRecord),

    /// Reply with the persisted conversion history.
    ShowHistory,
}
