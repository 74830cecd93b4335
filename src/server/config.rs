//! Server configuration types
//!
//! Contains all configuration structures for the Keywarden server,
//! loaded from a YAML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub vault: VaultSettings,
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub approval: ApprovalConfig,
    #[serde(default)]
    pub api_keys: Vec<ApiKeyConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
        }
    }
}

fn default_listen_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Vault connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSettings {
    pub address: String,
    #[serde(default)]
    pub token: String,
    /// KV v2 mount path, e.g. "secret"
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

fn default_mount_path() -> String {
    "secret".to_string()
}

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSettings {
    /// Bot token; falls back to TELEGRAM_BOT_TOKEN when empty
    #[serde(default)]
    pub bot_token: String,
    /// Chat that receives approval requests
    pub chat_id: i64,
}

/// Approval flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalConfig {
    /// How long a requester waits for a human decision, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    300
}

/// Per-client API key rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyConfig {
    /// Capability string presented in the URL path
    pub key: String,
    /// Vault path prefix this key is scoped to
    pub path_prefix: String,
    /// Source networks allowed to use this key (empty = any)
    #[serde(default)]
    pub allowed_cidrs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let yaml = r#"
server:
  listen_address: "127.0.0.1:9000"
vault:
  address: "http://127.0.0.1:8200"
  token: "s.abcdef"
  mount_path: "kv"
telegram:
  bot_token: "123456:token"
  chat_id: 987654321
approval:
  timeout_secs: 60
api_keys:
  - key: "client-a"
    path_prefix: "zfs"
    allowed_cidrs:
      - "10.0.0.0/24"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.listen_address, "127.0.0.1:9000");
        assert_eq!(config.vault.mount_path, "kv");
        assert_eq!(config.telegram.chat_id, 987654321);
        assert_eq!(config.approval.timeout_secs, 60);
        assert_eq!(config.api_keys.len(), 1);
        assert_eq!(config.api_keys[0].allowed_cidrs, vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml = r#"
vault:
  address: "http://127.0.0.1:8200"
telegram:
  chat_id: 1
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.listen_address, "0.0.0.0:8080");
        assert_eq!(config.vault.mount_path, "secret");
        assert!(config.vault.token.is_empty());
        assert_eq!(config.approval.timeout_secs, 300);
        assert!(config.api_keys.is_empty());
    }
}
