//! HashiCorp Vault KV v2 client

use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Read access to protected material, consulted only after approval
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret stored under `{path_prefix}/{name}` below the mount
    async fn read_secret(
        &self,
        path_prefix: &str,
        name: &str,
    ) -> Result<HashMap<String, serde_json::Value>>;
}

/// Vault connection settings
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address, e.g. `https://vault.internal:8200`
    pub address: String,
    /// Token sent in the `X-Vault-Token` header
    pub token: String,
    /// KV v2 mount path, e.g. `secret`
    pub mount_path: String,
}

/// Vault KV v2 HTTP client
pub struct VaultClient {
    http: reqwest::Client,
    config: VaultConfig,
}

/// KV v2 read response envelope (`data.data` holds the secret fields)
#[derive(Debug, Deserialize)]
struct KvReadResponse {
    data: KvReadData,
}

#[derive(Debug, Deserialize)]
struct KvReadData {
    data: HashMap<String, serde_json::Value>,
}

impl VaultClient {
    /// Create a new client
    #[must_use]
    pub fn new(config: VaultConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn secret_path(path_prefix: &str, name: &str) -> String {
        let prefix = path_prefix.trim_matches('/');
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        }
    }

    fn secret_url(&self, path: &str) -> String {
        format!(
            "{}/v1/{}/data/{}",
            self.config.address.trim_end_matches('/'),
            self.config.mount_path.trim_matches('/'),
            path
        )
    }
}

#[async_trait::async_trait]
impl SecretStore for VaultClient {
    async fn read_secret(
        &self,
        path_prefix: &str,
        name: &str,
    ) -> Result<HashMap<String, serde_json::Value>> {
        let path = Self::secret_path(path_prefix, name);
        let url = self.secret_url(&path);
        debug!(url = %url, "Reading secret from Vault");

        let response = self
            .http
            .get(&url)
            .header("X-Vault-Token", &self.config.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { path });
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let envelope: KvReadResponse = response.json().await?;
        Ok(envelope.data.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> VaultClient {
        VaultClient::new(VaultConfig {
            address: "http://vault.internal:8200/".to_string(),
            token: "test-token".to_string(),
            mount_path: "secret".to_string(),
        })
    }

    #[test]
    fn test_secret_url_joins_mount_and_path() {
        let client = test_client();
        assert_eq!(
            client.secret_url("zfs/tank"),
            "http://vault.internal:8200/v1/secret/data/zfs/tank"
        );
    }

    #[test]
    fn test_secret_path_handles_empty_prefix() {
        assert_eq!(VaultClient::secret_path("", "tank"), "tank");
        assert_eq!(VaultClient::secret_path("/zfs/", "tank"), "zfs/tank");
    }

    #[test]
    fn test_kv2_envelope_deserializes() {
        let body = r#"{
            "request_id": "7e2c1b",
            "data": {
                "data": {"key": "hunter2"},
                "metadata": {"version": 3}
            }
        }"#;

        let envelope: KvReadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            envelope.data.data.get("key"),
            Some(&serde_json::Value::String("hunter2".to_string()))
        );
    }
}
