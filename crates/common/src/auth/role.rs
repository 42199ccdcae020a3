//! Role claim extraction
//!
//! Reads the `role` claim from the payload segment of a three-part,
//! dot-delimited token. The signature is not checked: the result only drives
//! UI gating and must not be treated as a trust boundary.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// URL-safe alphabet; tokens normally drop padding but some issuers keep it.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const ROLE_CLAIM: &str = "role";

/// Roles the client recognises in a token payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    /// Map a claim value to a known role. Matching is exact.
    #[must_use]
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a token yielded no role.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleDecodeError {
    #[error("expected 3 dot-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("payload is not URL-safe base64: {0}")]
    Base64(String),

    #[error("payload is not a JSON object: {0}")]
    Json(String),

    #[error("payload has no role claim")]
    MissingRole,

    #[error("role claim is not a string")]
    NonStringRole,

    #[error("unrecognised role '{0}'")]
    UnknownRole(String),
}

/// Decode the role claim, reporting why decoding failed.
///
/// # Errors
/// Returns a [`RoleDecodeError`] for a malformed structure, an undecodable
/// payload, or a missing, non-string or unknown role.
pub fn try_decode_role(token: &str) -> Result<Role, RoleDecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(RoleDecodeError::SegmentCount(segments.len()));
    };

    let bytes =
        PAYLOAD_ENGINE.decode(payload).map_err(|e| RoleDecodeError::Base64(e.to_string()))?;
    let claims: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&bytes).map_err(|e| RoleDecodeError::Json(e.to_string()))?;

    let claim = claims.get(ROLE_CLAIM).ok_or(RoleDecodeError::MissingRole)?;
    let value = claim.as_str().ok_or(RoleDecodeError::NonStringRole)?;

    Role::from_claim(value).ok_or_else(|| RoleDecodeError::UnknownRole(value.to_string()))
}

/// Decode the role claim of `token`, degrading every failure to `None`.
#[must_use]
pub fn decode_role(token: &str) -> Option<Role> {
    match try_decode_role(token) {
        Ok(role) => Some(role),
        Err(reason) => {
            trace!(%reason, "token carries no usable role");
            None
        }
    }
}
