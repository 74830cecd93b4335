//! Web API module for Keywarden
//!
//! Provides the HTTP endpoints:
//! - Volume unlock (approval-gated secret retrieval)
//! - Health check

pub mod health;
pub mod unlock;

use axum::Router;

pub use health::health_routes;
pub use unlock::unlock_routes;

/// Create the API router with all endpoints
pub fn api_router() -> Router {
    Router::new().merge(health_routes()).merge(unlock_routes())
}
