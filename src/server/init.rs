//! Server initialization and lifecycle

use anyhow::{Context, Result};
use axum::Extension;
use keywarden_channels::{TelegramAdapter, TelegramConfig};
use keywarden_core::{ApprovalNotifier, ApprovalRegistry};
use keywarden_vault::{SecretStore, VaultClient, VaultConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::AppConfig;
use super::validation;
use crate::api;
use crate::api::unlock::UnlockState;
use crate::middleware::auth::ClientRules;

/// Run the server with the given configuration
pub async fn run(config: AppConfig) -> Result<()> {
    validation::validate_config(&config);

    // Rendezvous table shared by the HTTP handlers and the Telegram bot.
    let registry = Arc::new(ApprovalRegistry::new());

    let vault_client = Arc::new(VaultClient::new(VaultConfig {
        address: config.vault.address.clone(),
        token: config.vault.token.clone(),
        mount_path: config.vault.mount_path.clone(),
    }));

    let telegram_config =
        TelegramConfig::with_env_fallback(&config.telegram.bot_token, config.telegram.chat_id)
            .context("Invalid Telegram configuration")?;
    let adapter = Arc::new(TelegramAdapter::new(telegram_config, registry.clone()));

    // Resolver side: decisions arrive from Telegram at an unknown future
    // time, on the dispatcher task.
    let bot_handle = tokio::spawn(adapter.clone().run());

    let rules = Arc::new(ClientRules::from_config(&config.api_keys));
    let state = Arc::new(UnlockState {
        registry,
        notifier: adapter as Arc<dyn ApprovalNotifier>,
        secrets: vault_client as Arc<dyn SecretStore>,
        wait_timeout: Duration::from_secs(config.approval.timeout_secs),
    });

    let app = api::api_router()
        .layer(Extension(state))
        .layer(Extension(rules))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .server
        .listen_address
        .parse()
        .context("Invalid listen address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("Stopping Telegram bot...");
    bot_handle.abort();
    if let Ok(Err(e)) = bot_handle.await {
        warn!("Telegram bot task error: {}", e);
    }

    info!("Keywarden shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
