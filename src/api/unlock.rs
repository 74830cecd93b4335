//! Volume unlock endpoint
//!
//! A caller asks to unlock a volume; the handler registers an approval
//! request, notifies a human over the configured channel, and blocks
//! until the decision arrives or the wait times out. Only an approved
//! request ever reaches the secret backend.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use keywarden_core::{ApprovalNotifier, ApprovalOutcome, SharedApprovalRegistry};
use keywarden_vault::SecretStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::middleware::auth::{RequireClient, UnlockPath};

/// Shared state for the unlock endpoint
pub struct UnlockState {
    /// Rendezvous table between requesters and the human resolver
    pub registry: SharedApprovalRegistry,
    /// Channel that informs the human and carries the decision back
    pub notifier: Arc<dyn ApprovalNotifier>,
    /// Secret backend consulted after approval
    pub secrets: Arc<dyn SecretStore>,
    /// How long a requester waits for a decision
    pub wait_timeout: Duration,
}

/// Handle an unlock request end to end
async fn handle_unlock(
    RequireClient(rule): RequireClient,
    Path(path): Path<UnlockPath>,
    Extension(state): Extension<Arc<UnlockState>>,
) -> Response {
    let (request_id, rx) = state.registry.create().await;

    let description = format!("Request to unlock volume: {}", path.volume_id);
    if let Err(e) = state
        .notifier
        .request_approval(request_id, &description)
        .await
    {
        error!(request_id = %request_id, error = %e, "Failed to send approval request");
        // The request must not be left pending once notification failed.
        state.registry.resolve(request_id, false).await;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to send approval request"})),
        )
            .into_response();
    }

    match state
        .registry
        .wait(request_id, rx, state.wait_timeout)
        .await
    {
        ApprovalOutcome::Approved => {
            fetch_secret(&state, &rule.path_prefix, &path.volume_id, request_id).await
        }
        ApprovalOutcome::Denied => {
            info!(request_id = %request_id, volume_id = %path.volume_id, "Unlock denied");
            (StatusCode::FORBIDDEN, Json(json!({"status": "denied"}))).into_response()
        }
        ApprovalOutcome::TimedOut => {
            warn!(request_id = %request_id, volume_id = %path.volume_id, "Unlock timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({"status": "timeout"})),
            )
                .into_response()
        }
    }
}

/// Retrieve the secret for an approved request
async fn fetch_secret(
    state: &UnlockState,
    path_prefix: &str,
    volume_id: &str,
    request_id: Uuid,
) -> Response {
    match state.secrets.read_secret(path_prefix, volume_id).await {
        Ok(secret) => {
            info!(request_id = %request_id, volume_id = %volume_id, "Unlock approved");

            // ZFS compatibility: return raw key material when it is stored
            // under the conventional field.
            if let Some(value) = secret.get("key") {
                let raw = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return (StatusCode::OK, raw).into_response();
            }

            // No single key field; return the whole secret.
            (
                StatusCode::OK,
                Json(json!({"status": "approved", "secret": secret})),
            )
                .into_response()
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Vault fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Approved, but failed to fetch secret"})),
            )
                .into_response()
        }
    }
}

/// Create unlock routes
pub fn unlock_routes() -> Router {
    Router::new().route(
        "/unlock/:api_key/:volume_id",
        get(handle_unlock).post(handle_unlock),
    )
}
