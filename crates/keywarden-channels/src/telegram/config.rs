//! Telegram configuration types

use crate::error::{Error, Result};

/// Telegram bot configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub bot_token: String,
    /// Chat that receives approval requests and carries decisions back
    pub chat_id: i64,
}

impl TelegramConfig {
    /// Create with a bot token and decision chat
    #[must_use]
    pub fn new(bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id,
        }
    }

    /// Create, falling back to `TELEGRAM_BOT_TOKEN` when `bot_token` is empty
    pub fn with_env_fallback(bot_token: &str, chat_id: i64) -> Result<Self> {
        if !bot_token.is_empty() {
            return Ok(Self::new(bot_token, chat_id));
        }

        let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            Error::Config("telegram bot token not set (config or TELEGRAM_BOT_TOKEN)".to_string())
        })?;
        Ok(Self::new(token, chat_id))
    }
}
