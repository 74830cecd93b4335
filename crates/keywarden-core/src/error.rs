//! Error types for keywarden-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// The approval request could not be delivered to a decision-maker
    #[error("notification error: {0}")]
    Notification(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
