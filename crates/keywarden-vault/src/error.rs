//! Error types for keywarden-vault

use thiserror::Error;

/// Vault error type
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to Vault
    #[error("vault request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No secret stored at the requested path
    #[error("secret not found at {path}")]
    NotFound {
        /// Secret path below the mount
        path: String,
    },

    /// Vault rejected the request
    #[error("vault returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
