//! Access token persistence layered on top of `KeychainProvider`.
//!
//! The generic provider lives in `security::keychain`; this module only maps
//! the token backend contract onto it.

use tracing::debug;

use super::traits::TokenPersistence;
use super::types::TokenStorageError;
use crate::security::{KeychainError, KeychainProvider};

/// Keeps the access token in the platform keychain under one account name.
pub struct KeychainTokenPersistence {
    provider: KeychainProvider,
    account: String,
}

impl KeychainTokenPersistence {
    /// # Arguments
    /// * `provider` - Keychain scoped to the application service
    /// * `account` - Entry name holding the token (e.g. "access_token")
    pub fn new(provider: KeychainProvider, account: impl Into<String>) -> Self {
        Self { provider, account: account.into() }
    }
}

impl TokenPersistence for KeychainTokenPersistence {
    fn load(&self) -> Result<Option<String>, TokenStorageError> {
        match self.provider.get_secret(&self.account) {
            Ok(token) if token.trim().is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(KeychainError::NotFound) => {
                debug!(account = %self.account, "no access token in keychain");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStorageError> {
        self.provider.set_secret(&self.account, token)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenStorageError> {
        self.provider.delete_secret(&self.account)?;
        Ok(())
    }
}
