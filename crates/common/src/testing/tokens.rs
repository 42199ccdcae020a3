//! Unsigned token builders

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Build a `header.payload.signature` token whose payload is `claims`.
///
/// The signature segment is a placeholder; nothing in the client verifies it.
#[must_use]
pub fn make_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}
