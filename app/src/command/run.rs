use crate::command::CommandStrategy;
use std::time::Duration;
use tracing::info;
use valuta_config::Config;
use valuta_core::{ConversationEngine, InMemorySessionStore};
use valuta_providers::ExchangeRateApiProvider;
use valuta_telegram::TelegramBot;

/// Input for the `run` command.
pub struct RunInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
    /// Optional allowed chat IDs (overrides config)
    pub allow_from: Option<Vec<String>>,
}

/// Strategy for running the Telegram bot.
pub struct RunStrategy;

impl CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        // Get token from input or config
        let token = if let Some(t) = input.token {
            t
        } else if !config.telegram.token.is_empty() {
            config.telegram.token.clone()
        } else {
            anyhow::bail!("Telegram bot token not configured. Set \"telegram.token\" in config");
        };

        // Get allowed chats from input or config
        let allow_from = input
            .allow_from
            .unwrap_or_else(|| config.telegram.allow_from.clone());

        info!("Starting Telegram bot...");

        let rates = match config.rates.timeout_secs {
            Some(secs) => ExchangeRateApiProvider::with_timeout(Duration::from_secs(secs))?,
            None => ExchangeRateApiProvider::new(),
        }
        .with_base_url(config.rates.base_url.clone());
        info!("Rate endpoint: {}", config.rates.base_url);

        let log = super::open_conversion_log(&config)?;
        info!("Conversion log: {}", log.path().display());

        let engine = ConversationEngine::new(rates, log, InMemorySessionStore::new());
        let bot = TelegramBot::new(token, engine, &allow_from);

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
