//! Exchange-rate lookup contract.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::Currency;

/// Why a rate lookup produced no usable rate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("rate request failed: {0}")]
    Network(String),

    #[error("rate endpoint returned status {0}")]
    Status(u16),

    #[error("malformed rate response: {0}")]
    Decode(String),

    #[error("no rate for {0}")]
    MissingRate(Currency),
}

/// Rates relative to `base`, keyed by currency code.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: Currency,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    #[must_use]
    pub const fn new(base: Currency, rates: HashMap<String, f64>) -> Self {
        Self { base, rates }
    }

    /// Rate for `target`; absent, zero, negative or non-finite rates count as missing.
    pub fn rate_for(&self, target: Currency) -> Result<f64, LookupFailure> {
        self.rates
            .get(target.code())
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or(LookupFailure::MissingRate(target))
    }
}

/// Source of exchange rates. One call per conversion attempt; no retry, no cache.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest_rates(&self, base: Currency) -> Result<RateTable, LookupFailure>;
}
