//! Approval - human-in-the-loop authorization flow
//!
//! When a caller asks to perform a sensitive action, a pending request is
//! registered here, a human is notified out of band, and the caller blocks
//! until the decision arrives or its wait times out.

use std::sync::Arc;

pub mod registry;
pub mod traits;
pub mod types;

pub use registry::ApprovalRegistry;
pub use traits::ApprovalNotifier;
pub use types::ApprovalOutcome;

/// Shared registry handle type
pub type SharedApprovalRegistry = Arc<ApprovalRegistry>;

#[cfg(test)]
mod tests;
