//! Startup configuration validation
//!
//! Security checks before the server starts accepting unlock requests.

use tracing::warn;

use super::config::AppConfig;

/// Warn about configuration that weakens the approval gate
pub fn validate_config(config: &AppConfig) {
    if config.api_keys.is_empty() {
        warn!("No API keys configured; every unlock request will be rejected");
    }

    for key in &config.api_keys {
        if key.allowed_cidrs.is_empty() {
            warn!(
                path_prefix = %key.path_prefix,
                "API key accepts requests from any source address. \
                 Consider restricting it with allowed_cidrs."
            );
        }
    }

    if config.vault.token.is_empty() {
        warn!("Vault token is empty; secret fetches will fail after approval");
    }
}
