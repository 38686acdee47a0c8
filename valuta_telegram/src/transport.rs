use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::utils::html;
use valuta_core::{ChatTransport, Menu, Reply};

/// Inline keyboard for `menu`, one button per row.
#[must_use]
pub fn keyboard(menu: Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        menu.options()
            .into_iter()
            .map(|(label, action)| vec![InlineKeyboardButton::callback(label, action.encode())]),
    )
}

/// Message body; when a heading is present the text is HTML with a bold heading.
#[must_use]
pub fn render_text(reply: &Reply) -> String {
    match &reply.heading {
        Some(heading) => format!(
            "{}\n\n{}",
            html::bold(&html::escape(heading)),
            html::escape(&reply.text)
        ),
        None => reply.text.clone(),
    }
}

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, chat_id: i64, reply: &Reply) -> anyhow::Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), render_text(reply));
        if reply.heading.is_some() {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(menu) = reply.menu {
            request = request.reply_markup(keyboard(menu));
        }
        request.await?;
        Ok(())
    }

    async fn disable_choices(&self, chat_id: i64, message_id: i32) -> anyhow::Result<()> {
        self.bot
            .edit_message_reply_markup(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }
}
