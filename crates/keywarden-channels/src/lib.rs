//! Keywarden Channels - notification channel adapters
//!
//! This crate provides the asynchronous messaging surface that informs a
//! human decision-maker about a pending unlock request and carries their
//! decision back:
//! - Telegram (via teloxide)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod telegram;

pub use error::{Error, Result};

// Re-export Telegram adapter
pub use telegram::{TelegramAdapter, TelegramConfig};
