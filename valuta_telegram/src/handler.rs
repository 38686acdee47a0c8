use crate::{Result, TelegramBot};
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message, User};
use tracing::{debug, info, warn};
use valuta_core::{Action, Command, Event, Incoming};

fn username(user: Option<&User>) -> &str {
    user.and_then(|u| u.username.as_deref()).unwrap_or("unknown")
}

/// Handle any message (commands or regular text)
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id.0;
    let username = username(msg.from.as_ref());

    let Some(text) = msg.text() else {
        debug!("[@{username}] Ignoring non-text message");
        return Ok(());
    };

    if !bot.is_allowed(chat_id) {
        warn!("[@{username}] Rejected message from chat {chat_id}");
        return Ok(());
    }

    let event = if let Some(command) = Command::parse_from_text(text) {
        info!("[@{username}] Command: {command:?}");
        Event::Command {
            command,
            first_name: msg.from.as_ref().map(|u| u.first_name.clone()),
        }
    } else {
        info!("[@{username}] Message: {text}");
        Event::Text(text.to_string())
    };

    bot.dispatch(Incoming::message(chat_id), event).await
}

/// Handle inline button presses
pub async fn handle_callback(bot: TelegramBot, query: CallbackQuery) -> Result<()> {
    let username = username(Some(&query.from));

    // Stop the client-side spinner before doing any work.
    if let Err(e) = bot.bot.answer_callback_query(query.id.clone()).await {
        warn!("[@{username}] Failed to answer callback query: {e}");
    }

    let Some(message) = query.message.as_ref() else {
        debug!("[@{username}] Callback without a message, ignoring");
        return Ok(());
    };
    let chat_id = message.chat().id.0;

    if !bot.is_allowed(chat_id) {
        warn!("[@{username}] Rejected callback from chat {chat_id}");
        return Ok(());
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(action) = Action::decode(data) else {
        warn!("[@{username}] Unknown callback payload: {data}");
        return Ok(());
    };

    info!("[@{username}] Action: {action:?}");

    bot.dispatch(Incoming::button(chat_id, message.id().0), Event::Action(action))
        .await
}
