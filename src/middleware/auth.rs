//! Client authentication for the unlock API
//!
//! Resolves the API key from the request path against the configured
//! client rules and enforces per-key source IP allow-lists. Provides the
//! `RequireClient` extractor for handlers.

use axum::{
    extract::{ConnectInfo, FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::warn;

use crate::server::config::ApiKeyConfig;

/// Access rule resolved for an authenticated client
#[derive(Debug, Clone)]
pub struct ClientRule {
    /// Networks allowed to use this key (empty = any source address)
    pub allowed_nets: Vec<IpNet>,
    /// Vault path prefix this key is scoped to
    pub path_prefix: String,
}

impl ClientRule {
    /// Check whether a source address may use this key
    #[must_use]
    pub fn allows_ip(&self, ip: IpAddr) -> bool {
        self.allowed_nets.is_empty() || self.allowed_nets.iter().any(|net| net.contains(&ip))
    }
}

/// API-key to client-rule mapping built from configuration
#[derive(Debug, Default)]
pub struct ClientRules {
    rules: HashMap<String, Arc<ClientRule>>,
}

impl ClientRules {
    /// Build the rule table, skipping invalid CIDR entries with a warning
    #[must_use]
    pub fn from_config(api_keys: &[ApiKeyConfig]) -> Self {
        let mut rules = HashMap::new();

        for key in api_keys {
            let mut allowed_nets = Vec::new();
            for cidr in &key.allowed_cidrs {
                match cidr.parse::<IpNet>() {
                    Ok(net) => allowed_nets.push(net),
                    Err(e) => {
                        warn!(cidr = %cidr, error = %e, "Skipping invalid CIDR for API key");
                    }
                }
            }

            rules.insert(
                key.key.clone(),
                Arc::new(ClientRule {
                    allowed_nets,
                    path_prefix: key.path_prefix.clone(),
                }),
            );
        }

        Self { rules }
    }

    /// Look up a rule by API key
    pub fn get(&self, api_key: &str) -> Option<Arc<ClientRule>> {
        self.rules.get(api_key).cloned()
    }
}

/// Path parameters of the unlock routes
#[derive(Debug, Deserialize)]
pub struct UnlockPath {
    /// Client API key
    pub api_key: String,
    /// Volume whose key material is requested
    pub volume_id: String,
}

/// JSON error response for auth failures
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: String,
}

/// Auth rejection type
pub struct AuthRejection {
    status: StatusCode,
    message: &'static str,
}

impl AuthRejection {
    fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(AuthErrorResponse {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Axum extractor that authenticates the calling client.
///
/// Resolves the `:api_key` path parameter against the configured rules
/// and enforces the key's source IP allow-list.
pub struct RequireClient(pub Arc<ClientRule>);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for RequireClient
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let rules = parts
            .extensions
            .get::<Arc<ClientRules>>()
            .cloned()
            .ok_or_else(|| {
                AuthRejection::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Client rules not configured",
                )
            })?;

        let Path(path) = parts
            .extract::<Path<UnlockPath>>()
            .await
            .map_err(|_| AuthRejection::new(StatusCode::UNAUTHORIZED, "Missing key parameter"))?;

        let Some(rule) = rules.get(&path.api_key) else {
            return Err(AuthRejection::new(StatusCode::UNAUTHORIZED, "Unauthorized"));
        };

        if !rule.allowed_nets.is_empty() {
            let Some(ip) = client_ip(parts) else {
                return Err(AuthRejection::new(StatusCode::FORBIDDEN, "Invalid IP"));
            };

            if !rule.allows_ip(ip) {
                warn!(ip = %ip, "Access denied by IP allow-list");
                return Err(AuthRejection::new(StatusCode::FORBIDDEN, "IP not allowed"));
            }
        }

        Ok(RequireClient(rule))
    }
}

/// Extract the client address from forwarding headers or the socket
fn client_ip(parts: &Parts) -> Option<IpAddr> {
    for header in ["x-forwarded-for", "x-real-ip"] {
        if let Some(value) = parts.headers.get(header) {
            if let Ok(value) = value.to_str() {
                let first = value.split(',').next().unwrap_or("").trim();
                if let Ok(ip) = first.parse() {
                    return Some(ip);
                }
            }
        }
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
