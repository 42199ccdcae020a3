//! Traits for durable token storage
//!
//! Abstracts where the bearer token survives restarts so the store can be
//! tested with in-memory mocks and run against the keychain or a file.

use super::types::TokenStorageError;

/// Durable copy of the access token.
///
/// Implementations report failures; [`TokenStore`](super::TokenStore) decides
/// to log and swallow them.
pub trait TokenPersistence: Send + Sync {
    /// Read the persisted token.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been persisted.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn load(&self) -> Result<Option<String>, TokenStorageError>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    fn save(&self, token: &str) -> Result<(), TokenStorageError>;

    /// Remove the persisted token. Removing a missing token succeeds.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    fn remove(&self) -> Result<(), TokenStorageError>;
}
