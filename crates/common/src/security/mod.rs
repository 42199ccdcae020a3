//! Security primitives and utilities
//!
//! Generic platform keychain access, independent of token semantics.

pub mod keychain;

pub use keychain::{KeychainError, KeychainProvider};
