//! Application constants
//!
//! Centralized location for endpoint paths and the envelope codes the client
//! produces itself.

/// Envelope code signalling success.
pub const SUCCESS_CODE: i64 = 0;

/// Envelope code synthesized after a failed refresh. Internal to the client,
/// never compared against codes returned by the server.
pub const UNAUTHORIZED_CODE: i64 = 40100;
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "roster";
pub const ACCESS_TOKEN_ACCOUNT: &str = "access_token";
pub const ACCESS_TOKEN_FILE: &str = "access_token";
pub const COOKIE_FILE: &str = "cookies.json";

pub const LOGIN_VIEW: &str = "/login";
pub const HOME_VIEW: &str = "/";

// Endpoint paths (relative to the configured base URL)
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_ME: &str = "/auth/me";
pub const AUTH_REGISTER_SEND_CODE: &str = "/auth/register/send-code";
pub const AUTH_REGISTER_VERIFY: &str = "/auth/register/verify-and-create";
pub const AUTH_PASSWORD_CHANGE: &str = "/auth/password/change";
pub const AUTH_PASSWORD_RESET_SEND_CODE: &str = "/auth/password/reset/send-code";
pub const AUTH_PASSWORD_RESET_CONFIRM: &str = "/auth/password/reset/confirm";
pub const STUDENTS: &str = "/students";

const SESSION_ENDPOINTS: &[&str] = &[AUTH_LOGIN, AUTH_LOGOUT, AUTH_REFRESH];
const ANONYMOUS_PREFIXES: &[&str] = &["/auth/register/", "/auth/password/reset/"];

/// Whether a 401 on `path` must be returned as-is instead of triggering a
/// token refresh.
///
/// Covers the endpoints that establish or end a session and the anonymous
/// registration/reset flows. `/auth/me` and `/auth/password/change` carry a
/// bearer token and are not exempt.
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    let normalized =
        if path.starts_with('/') { path.to_string() } else { format!("/{path}") };

    SESSION_ENDPOINTS.contains(&normalized.as_str())
        || ANONYMOUS_PREFIXES.iter().any(|prefix| normalized.starts_with(prefix))
}
