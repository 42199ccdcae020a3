//! Modular common utilities shared across roster crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - default: role decoding, the token store and its persistence trait
//! - `platform`: keychain-backed persistence via the `keyring` crate
//! - `test-utils`: mock persistence and unsigned token builders

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use auth::{decode_role, AuthChange, Role, TokenPersistence, TokenStorageError, TokenStore};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider};
