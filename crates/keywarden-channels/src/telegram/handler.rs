//! Telegram callback handler and bot runner

use super::adapter::TelegramAdapter;
use crate::error::Result;
use std::sync::Arc;
use teloxide::{payloads::AnswerCallbackQuerySetters, prelude::*, types::CallbackQuery};
use tracing::{debug, info, warn};
use uuid::Uuid;

impl TelegramAdapter {
    /// Start the bot and dispatch incoming decisions until shutdown.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        info!("Starting Telegram bot");

        let bot = self.bot.clone();
        let adapter = self.clone();

        let handler =
            Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                let adapter = adapter.clone();
                async move { Self::handle_callback(adapter, bot, query).await }
            });

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    /// Handle an approve/deny button press
    pub(crate) async fn handle_callback(
        adapter: Arc<Self>,
        bot: Bot,
        query: CallbackQuery,
    ) -> ResponseResult<()> {
        let Some(data) = query.data.as_deref() else {
            return Ok(());
        };

        let Some((approved, request_id)) = parse_callback(data) else {
            debug!(data = %data, "Ignoring malformed callback data");
            return Ok(());
        };

        let resolved = adapter.registry.resolve(request_id, approved).await;

        let response_text = if resolved {
            if approved {
                format!("✅ Request {} approved", request_id)
            } else {
                format!("❌ Request {} denied", request_id)
            }
        } else {
            // The decision lost the race against the requester's timeout.
            "⚠️ Request expired or not found".to_string()
        };

        info!(request_id = %request_id, approved, resolved, "Handled approval callback");

        // Answer the callback to stop the client's loading animation.
        if let Err(e) = bot
            .answer_callback_query(query.id.clone())
            .text(response_text.clone())
            .await
        {
            warn!(error = %e, "Failed to answer callback query");
        }

        // Drop the buttons so the decision cannot be re-sent from the chat.
        if resolved {
            if let Some(message) = query.message {
                if let Err(e) = bot
                    .edit_message_text(message.chat().id, message.id(), response_text)
                    .await
                {
                    warn!(error = %e, "Failed to edit approval message");
                }
            }
        }

        Ok(())
    }
}

/// Parse `approve:<uuid>` / `deny:<uuid>` callback data
pub(crate) fn parse_callback(data: &str) -> Option<(bool, Uuid)> {
    let (action, id) = data.split_once(':')?;

    let approved = match action {
        "approve" => true,
        "deny" => false,
        _ => return None,
    };

    Some((approved, Uuid::parse_str(id).ok()?))
}
