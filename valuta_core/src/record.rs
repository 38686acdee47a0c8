//! Completed conversions and the log they are written to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Amount, Currency};

/// Number of conversions kept in the log.
pub const MAX_RECORDS: usize = 10;

/// One completed conversion, as persisted in the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub from: Currency,
    pub to: Currency,
    pub amount: Amount,
    /// `amount * rate`, rounded to cents.
    pub result: f64,
}

impl ConversionRecord {
    #[must_use]
    pub fn new(from: Currency, to: Currency, amount: Amount, rate: f64) -> Self {
        Self {
            from,
            to,
            amount,
            result: round_cents(amount.value() * rate),
        }
    }
}

impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {:.2} {}",
            self.amount, self.from, self.result, self.to
        )
    }
}

/// Round half away from zero to two fractional digits.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bounded, persisted history of conversions.
#[async_trait]
pub trait ConversionLog: Send + Sync {
    /// Append a record, evicting the oldest ones beyond [`MAX_RECORDS`].
    async fn append(&self, record: ConversionRecord) -> anyhow::Result<()>;

    /// Recorded conversions, oldest first.
    async fn recent(&self) -> anyhow::Result<Vec<ConversionRecord>>;
}

#[async_trait]
impl<T: ConversionLog + ?Sized> ConversionLog for std::sync::Arc<T> {
    async fn append(&self, record: ConversionRecord) -> anyhow::Result<()> {
        (**self).append(record).await
    }

    async fn recent(&self) -> anyhow::Result<Vec<ConversionRecord>> {
        (**self).recent().await
    }
}
