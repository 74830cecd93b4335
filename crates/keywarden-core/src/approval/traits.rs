//! Notifier seam between the registry and the outside world

use uuid::Uuid;

/// Trait for delivering approval requests to a human decision-maker.
///
/// Implementations forward a human-readable description for request `id`
/// to someone capable of deciding it; the decision comes back later
/// through [`ApprovalRegistry::resolve`](super::ApprovalRegistry::resolve).
#[async_trait::async_trait]
pub trait ApprovalNotifier: Send + Sync {
    /// Ask a human to approve or deny the request
    async fn request_approval(&self, id: Uuid, description: &str) -> crate::Result<()>;
}
