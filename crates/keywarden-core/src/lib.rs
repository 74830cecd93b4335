//! Keywarden Core - Approval Coordination
//!
//! This crate provides the rendezvous point between a requester that is
//! blocked waiting for an authorization decision and a resolver that
//! delivers a human's decision from an unrelated execution context:
//! - Registry: in-flight request table with exactly-once resolution
//! - Wait protocol: decision, denial, or bounded timeout with cleanup
//! - Notifier: the seam to whatever channel reaches the human

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod approval;
pub mod error;

pub use approval::{
    ApprovalNotifier, ApprovalOutcome, ApprovalRegistry, SharedApprovalRegistry,
};
pub use error::{Error, Result};
