use crate::transport::TelegramTransport;
use crate::{Result, bot_commands};
use std::{sync::Arc, time::Duration};
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};
use valuta_core::{ConversationEngine, Event, InMemorySessionStore, Incoming};
use valuta_providers::ExchangeRateApiProvider;
use valuta_storage::JsonFileLog;

/// Engine wired to the live rate endpoint and the JSON conversion log.
pub type BotEngine = ConversationEngine<ExchangeRateApiProvider, JsonFileLog, InMemorySessionStore>;

/// Telegram bot driving the conversion flow
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    engine: Arc<BotEngine>,
    transport: TelegramTransport,
    /// Allowed chat IDs
    allowed_chats: Vec<i64>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    #[must_use]
    pub fn new(token: String, engine: BotEngine, allowed_chats: &[String]) -> Self {
        // Parse allowed chat IDs
        let allowed_chats = allowed_chats
            .iter()
            .filter_map(|s| match s.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring invalid chat id in allow list: {s}");
                    None
                }
            })
            .collect();

        let bot = Bot::new(token);

        Self {
            transport: TelegramTransport::new(bot.clone()),
            bot,
            engine: Arc::new(engine),
            allowed_chats,
        }
    }

    /// Check if a chat is allowed
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }

    /// Run one event through the conversation engine.
    pub async fn dispatch(&self, incoming: Incoming, event: Event) -> Result<()> {
        self.engine
            .handle(&self.transport, incoming, event)
            .await
            .map_err(Into::into)
    }

    /// Test connection to Telegram API with linear backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(bot_user) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        bot_user
                            .user
                            .username
                            .unwrap_or_else(|| "no username".to_string()),
                        bot_user.user.id
                    );
                    return;
                }
                Err(e) => {
                    // 2s, 4s, 6s, 8s, 10s, 10s, ...
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    // Only show detailed help on first failure
                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                        warn!("  - Telegram API being temporarily unavailable");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::{CallbackQuery, Message, Update};

        self.test_connection().await;

        if let Err(e) = self.bot.set_my_commands(bot_commands()).await {
            warn!("Failed to register bot commands: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry()
            .branch(Update::filter_message().endpoint({
                let this = self.clone();
                move |_bot: Bot, msg: Message| {
                    let this = this.clone();
                    async move { crate::handler::handle_message(this, msg).await }
                }
            }))
            .branch(Update::filter_callback_query().endpoint({
                let this = self.clone();
                move |_bot: Bot, query: CallbackQuery| {
                    let this = this.clone();
                    async move { crate::handler::handle_callback(this, query).await }
                }
            }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram bot stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot_with(allow: &[&str]) -> TelegramBot {
        let allow: Vec<String> = allow.iter().map(ToString::to_string).collect();
        let engine = ConversationEngine::new(
            ExchangeRateApiProvider::new(),
            JsonFileLog::new("conversions.json"),
            InMemorySessionStore::new(),
        );
        TelegramBot::new("123:TEST".to_string(), engine, &allow)
    }

    #[test]
    fn empty_allow_list_admits_everyone() {
        assert!(bot_with(&[]).is_allowed(42));
    }

    #[test]
    fn allow_list_filters_chats_and_skips_garbage() {
        let bot = bot_with(&["42", " -100 ", "not-a-number"]);
        assert!(bot.is_allowed(42));
        assert!(bot.is_allowed(-100));
        assert!(!bot.is_allowed(7));
    }
}
