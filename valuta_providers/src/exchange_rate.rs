use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use valuta_core::{Currency, LookupFailure, RateProvider, RateTable};

/// Body of `GET <base-url>/<CODE>`; fields other than `rates` are ignored.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Client for exchangerate-api.com style endpoints.
#[derive(Debug, Clone)]
pub struct ExchangeRateApiProvider {
    client: Client,
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.exchangerate-api.com/v4/latest";

    #[must_use]
    pub fn new() -> Self {
        info!("Creating ExchangeRateApiProvider");
        Self {
            client: Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Same as [`ExchangeRateApiProvider::new`] with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url_for(&self, base: Currency) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), base.code())
    }
}

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    async fn latest_rates(&self, base: Currency) -> Result<RateTable, LookupFailure> {
        let url = self.url_for(base);
        debug!("Requesting rates: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status.as_u16()));
        }

        let body = response
            .json::<LatestRatesResponse>()
            .await
            .map_err(|e| LookupFailure::Decode(e.to_string()))?;

        Ok(RateTable::new(base, body.rates))
    }
}
