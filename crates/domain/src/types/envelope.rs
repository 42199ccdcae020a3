//! Uniform response wrapper

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{SUCCESS_CODE, UNAUTHORIZED_CODE, UNAUTHORIZED_MESSAGE};

/// `{code, message, data}` response wrapper used by every endpoint.
///
/// `code == 0` signals success; any other value is a domain-level failure
/// described by `message`. Envelopes synthesized locally follow the same
/// rule, so callers only ever branch on `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self { code: SUCCESS_CODE, message: String::new(), data: Some(data) }
    }

    /// Failure envelope without payload.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    /// Envelope returned after the session could not be refreshed.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::failure(UNAUTHORIZED_CODE, UNAUTHORIZED_MESSAGE)
    }

    /// Envelope standing in for a body that was not a JSON envelope.
    ///
    /// The HTTP status becomes the code; statuses are never 0, so the result
    /// always reads as a failure.
    pub fn from_status(status: u16, reason: impl Into<String>) -> Self {
        Self::failure(i64::from(status), reason)
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == UNAUTHORIZED_CODE
    }

    /// Payload of a successful envelope.
    pub fn into_data(self) -> Option<T> {
        if self.is_success() {
            self.data
        } else {
            None
        }
    }
}

/// Some backends send `"message": null` on success.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
