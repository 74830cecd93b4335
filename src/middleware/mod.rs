//! HTTP middleware for Keywarden

pub mod auth;
