//! Authentication payloads
//!
//! Request bodies for the `/auth/*` endpoints and the data they return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, RosterError};

/// Credentials for `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Access token issued by login, registration and refresh.
///
/// The refresh credential itself travels as an HttpOnly cookie and never
/// appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub access_token: String,
    /// Unix timestamp (seconds) after which the refresh cookie is no longer
    /// accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_expires_at: Option<i64>,
}

impl AccessGrant {
    /// The grant carries a usable token.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    #[must_use]
    pub fn refresh_expires_at(&self) -> Option<DateTime<Utc>> {
        self.refresh_expires_at.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Profile returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    /// Role as reported by the server (`user`, `admin`).
    pub role: String,
    pub is_active: bool,
    pub token_version: i64,
}

/// Body for the endpoints that only take an email (registration and reset
/// codes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Body for `/auth/register/verify-and-create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterVerifyRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}

/// Body for `/auth/password/change`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    /// Rejects a confirmation that differs from the new password before
    /// anything is sent.
    ///
    /// # Errors
    /// Returns `RosterError::InvalidInput` when the passwords differ.
    pub fn validate(&self) -> Result<()> {
        ensure_confirmed(&self.new_password, &self.confirm_password)
    }
}

/// Body for `/auth/password/reset/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordRequest {
    /// # Errors
    /// Returns `RosterError::InvalidInput` when the passwords differ.
    pub fn validate(&self) -> Result<()> {
        ensure_confirmed(&self.new_password, &self.confirm_password)
    }
}

fn ensure_confirmed(new_password: &str, confirm_password: &str) -> Result<()> {
    if new_password == confirm_password {
        Ok(())
    } else {
        Err(RosterError::InvalidInput("new password and confirmation do not match".into()))
    }
}
