//! Telegram - teloxide adapter
//!
//! This module provides the Telegram bot adapter using the teloxide
//! library. It delivers approval requests as messages with inline
//! approve/deny buttons and feeds button presses back into the registry.

mod adapter;
mod config;
mod handler;


// Re-export all public types
pub use adapter::TelegramAdapter;
pub use config::TelegramConfig;
