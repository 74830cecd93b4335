//! In-flight approval request registry

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::ApprovalOutcome;

/// Registry of pending approval requests.
///
/// Each entry pairs an unguessable request id with the send side of a
/// one-shot decision slot. The requester holds the receive side and blocks
/// on [`wait`](Self::wait); a resolver on any other task delivers the
/// decision through [`resolve`](Self::resolve). Removal from the map is
/// the serialization point: whichever of explicit resolution and timeout
/// cleanup removes the entry first owns the request's fate.
pub struct ApprovalRegistry {
    pending: RwLock<HashMap<Uuid, oneshot::Sender<bool>>>,
}

impl Default for ApprovalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ApprovalRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new pending request.
    ///
    /// Returns the request id and the receive side of its decision slot.
    /// The id doubles as the capability for resolving the request, so it
    /// is drawn from a 128-bit random space and never reused.
    pub async fn create(&self) -> (Uuid, oneshot::Receiver<bool>) {
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();

        self.pending.write().await.insert(id, tx);

        info!(request_id = %id, "Created approval request");
        (id, rx)
    }

    /// Deliver a decision for a pending request.
    ///
    /// Returns `true` if `id` matched a pending entry: the entry is
    /// removed and the decision handed to the waiter. A waiter that has
    /// already abandoned its wait simply never receives the value; the
    /// registry mutation stands either way.
    ///
    /// Returns `false` if `id` is unknown, already resolved, or already
    /// expired. This is an expected race outcome, not an error.
    pub async fn resolve(&self, id: Uuid, approved: bool) -> bool {
        // Lookup and removal must be one atomic step so that concurrent
        // resolvers (or a resolver racing timeout cleanup) cannot both
        // claim the same entry.
        let Some(tx) = self.pending.write().await.remove(&id) else {
            warn!(request_id = %id, "Attempted to resolve unknown request");
            return false;
        };

        if tx.send(approved).is_err() {
            debug!(request_id = %id, "Waiter already gone, decision dropped");
        } else {
            info!(request_id = %id, approved, "Resolved approval request");
        }

        true
    }

    /// Block until a decision arrives or `timeout` elapses.
    ///
    /// On timeout the registry entry is reclaimed through the deny path
    /// before returning, so no entry outlives its requester. A decision
    /// that loses the race against the timeout is discarded.
    pub async fn wait(
        &self,
        id: Uuid,
        rx: oneshot::Receiver<bool>,
        timeout: Duration,
    ) -> ApprovalOutcome {
        tokio::select! {
            decision = rx => match decision {
                Ok(true) => ApprovalOutcome::Approved,
                Ok(false) => ApprovalOutcome::Denied,
                // Sender dropped without a decision. Cannot happen while
                // the entry is still registered; reclaim it just in case.
                Err(_) => {
                    self.resolve(id, false).await;
                    ApprovalOutcome::Denied
                }
            },
            _ = tokio::time::sleep(timeout) => {
                // Best-effort cleanup; a no-op if a resolver won the race.
                self.resolve(id, false).await;
                warn!(request_id = %id, "Approval request timed out");
                ApprovalOutcome::TimedOut
            }
        }
    }

    /// Number of requests currently pending
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}
