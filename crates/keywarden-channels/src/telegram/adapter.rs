//! Telegram adapter core

use super::config::TelegramConfig;
use keywarden_core::{ApprovalNotifier, SharedApprovalRegistry};
use teloxide::{
    payloads::SendMessageSetters,
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    utils::html,
};
use uuid::Uuid;

/// Telegram bot adapter
pub struct TelegramAdapter {
    pub(crate) bot: Bot,
    pub(crate) config: TelegramConfig,
    pub(crate) registry: SharedApprovalRegistry,
}

impl TelegramAdapter {
    /// Create a new Telegram adapter
    #[must_use]
    pub fn new(config: TelegramConfig, registry: SharedApprovalRegistry) -> Self {
        let bot = Bot::new(&config.bot_token);
        Self {
            bot,
            config,
            registry,
        }
    }

    /// Get the underlying bot
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait::async_trait]
impl ApprovalNotifier for TelegramAdapter {
    async fn request_approval(&self, id: Uuid, description: &str) -> keywarden_core::Result<()> {
        let text = format!(
            "🔓 <b>Unlock Request</b>\nID: <code>{}</code>\nInfo: {}",
            id,
            html::escape(description)
        );

        let buttons = vec![
            InlineKeyboardButton::callback("✅ Approve", format!("approve:{}", id)),
            InlineKeyboardButton::callback("❌ Deny", format!("deny:{}", id)),
        ];
        let keyboard = InlineKeyboardMarkup::new(vec![buttons]);

        self.bot
            .send_message(ChatId(self.config.chat_id), text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await
            .map_err(|e| keywarden_core::Error::Notification(e.to_string()))?;

        Ok(())
    }
}
