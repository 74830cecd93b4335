//! Keywarden Vault - secret retrieval
//!
//! This crate provides the secret-fetch collaborator consulted once an
//! unlock request has been approved: a HashiCorp Vault KV v2 client
//! behind the [`SecretStore`] trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{SecretStore, VaultClient, VaultConfig};
pub use error::{Error, Result};
