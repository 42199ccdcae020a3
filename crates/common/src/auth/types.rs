//! Token store notifications and storage errors

use thiserror::Error;

use super::role::Role;

/// Session transitions published by [`TokenStore`](super::TokenStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChange {
    /// A token was stored; `role` is what its payload decoded to.
    SignedIn { role: Option<Role> },
    /// The token was cleared.
    SignedOut,
}

/// Failure of a durable token backend.
#[derive(Debug, Error)]
pub enum TokenStorageError {
    /// Filesystem access failed
    #[error("token file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Keychain access failed
    #[cfg(feature = "platform")]
    #[error("keychain access failed: {0}")]
    Keychain(#[from] crate::security::KeychainError),

    /// Backend cannot be used in this environment
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
}
