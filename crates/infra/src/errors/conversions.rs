//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use roster_common::TokenStorageError;
use roster_domain::RosterError;
use thiserror::Error;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(#[from] pub RosterError);

impl From<InfraError> for RosterError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRosterError {
    fn into_roster(self) -> RosterError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for HttpError {
    fn into_roster(self) -> RosterError {
        if self.is_timeout() {
            return RosterError::Timeout(format!("HTTP request timed out: {self}"));
        }

        if self.is_builder() {
            return RosterError::Config(format!("invalid HTTP request: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return RosterError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return RosterError::Serialization(format!("failed to decode HTTP body: {self}"));
        }

        RosterError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for std::io::Error {
    fn into_roster(self) -> RosterError {
        RosterError::Storage(format!("{:?}: {self}", self.kind()))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        Self(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for serde_json::Error {
    fn into_roster(self) -> RosterError {
        RosterError::Serialization(self.to_string())
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error / TokenStorageError → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for KeyringError {
    fn into_roster(self) -> RosterError {
        match self {
            KeyringError::NoEntry => RosterError::Storage("keychain entry not found".into()),
            KeyringError::NoStorageAccess(err) => {
                RosterError::Storage(format!("unable to access secure storage: {err}"))
            }
            KeyringError::PlatformFailure(err) => {
                RosterError::Storage(format!("keychain platform error: {err}"))
            }
            other => RosterError::Storage(other.to_string()),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        Self(value.into_roster())
    }
}

impl From<TokenStorageError> for InfraError {
    fn from(value: TokenStorageError) -> Self {
        Self(RosterError::Storage(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
