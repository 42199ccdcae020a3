//! Route guards
//!
//! Decide, from the token store alone, whether a view may render. Roles come
//! from the unsigned token payload, so a guard only hides UI; the server still
//! authorises every request.

use roster_common::{Role, TokenStore};
use roster_domain::constants::{HOME_VIEW, LOGIN_VIEW};
use tracing::debug;

use super::ports::SessionNavigator;

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The current role matches.
    Granted,
    /// No role could be read yet; render nothing and wait.
    Pending,
    /// A different role is present; the user was sent home.
    ///
    /// [`Role`] has a single variant today, so this needs a second
    /// recognised role before any token can produce it.
    Denied,
}

/// Require a stored token before rendering `current_path`.
///
/// Without a token the user is redirected to the login view with
/// `current_path` as the return target, and `false` is returned.
pub fn require_auth(
    store: &TokenStore,
    current_path: Option<&str>,
    navigator: &dyn SessionNavigator,
) -> bool {
    if store.get().is_some() {
        return true;
    }

    debug!(path = ?current_path, "no access token, redirecting to login");
    navigator.redirect_to_login(current_path.filter(|path| !path.is_empty()));
    false
}

/// Require `required` before rendering.
pub fn require_role(
    store: &TokenStore,
    required: Role,
    navigator: &dyn SessionNavigator,
) -> Access {
    match store.role() {
        None => Access::Pending,
        Some(role) if role == required => Access::Granted,
        Some(role) => {
            debug!(%role, %required, "role mismatch, redirecting home");
            navigator.redirect_home();
            Access::Denied
        }
    }
}

/// Return target after login: only local absolute paths are honoured.
///
/// Rejects protocol-relative (`//host`) and absolute (`scheme://`) targets so
/// a crafted `next` cannot send the user off-site.
#[must_use]
pub fn sanitize_next(raw: Option<&str>) -> &str {
    match raw {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains("://") => {
            path
        }
        _ => HOME_VIEW,
    }
}

/// Login view location carrying `next` as an encoded query parameter.
#[must_use]
pub fn login_location(next: Option<&str>) -> String {
    match next {
        Some(path) => format!("{LOGIN_VIEW}?next={}", urlencoding::encode(path)),
        None => LOGIN_VIEW.to_string(),
    }
}
