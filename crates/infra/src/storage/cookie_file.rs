//! Session cookie persistence
//!
//! The refresh credential is an HttpOnly cookie. A CLI process lives for one
//! command, so the cookie has to be written down for the next invocation to
//! be able to refresh.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use roster_domain::RosterError;
use serde::{Deserialize, Serialize};
use url::Url;

use super::write_private;
use crate::errors::InfraError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCookie {
    /// URL the cookie was received from.
    url: String,
    /// Raw `Set-Cookie` value.
    raw: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieFile {
    /// Keyed by `<host> <name>`.
    cookies: BTreeMap<String, StoredCookie>,
}

/// Cookie jar that mirrors every `Set-Cookie` it receives to a JSON file.
///
/// Lookups are served by an in-memory [`Jar`]; the file is replayed into it
/// on [`PersistentCookieJar::open`]. Write failures are logged and otherwise
/// ignored.
#[derive(Debug)]
pub struct PersistentCookieJar {
    jar: Jar,
    path: PathBuf,
    stored: Mutex<CookieFile>,
}

impl PersistentCookieJar {
    /// Open the jar at `path`, loading whatever was saved there.
    ///
    /// # Errors
    /// Returns `RosterError::Storage` if the file exists but cannot be read,
    /// or `RosterError::Serialization` if it is not a cookie file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RosterError> {
        let path = path.into();
        let stored = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<CookieFile>(&bytes)
                .map_err(|e| RosterError::from(InfraError::from(e)))?,
            Err(err) if err.kind() == ErrorKind::NotFound => CookieFile::default(),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let jar = Jar::default();
        for cookie in stored.cookies.values() {
            match Url::parse(&cookie.url) {
                Ok(url) => jar.add_cookie_str(&cookie.raw, &url),
                Err(err) => tracing::warn!(error = %err, "cookie_file.invalid_url"),
            }
        }

        tracing::debug!(path = %path.display(), count = stored.cookies.len(), "cookie_file.loaded");
        Ok(Self { jar, path, stored: Mutex::new(stored) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forget every cookie, in memory and on disk.
    ///
    /// The in-memory jar cannot be emptied, so this only affects later
    /// processes; use it after logout.
    pub fn clear_persisted(&self) {
        self.stored.lock().cookies.clear();
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!(error = %err, path = %self.path.display(), "cookie_file.remove_failed");
            }
        }
    }

    fn record(&self, raw: &str, url: &Url) {
        let Some(name) = cookie_name(raw) else {
            return;
        };
        let key = format!("{} {name}", url.host_str().unwrap_or_default());

        let mut stored = self.stored.lock();
        if is_removal(raw) {
            stored.cookies.remove(&key);
        } else {
            stored.cookies.insert(key, StoredCookie { url: url.to_string(), raw: raw.to_string() });
        }

        let result = serde_json::to_vec_pretty(&*stored)
            .map_err(std::io::Error::from)
            .and_then(|bytes| write_private(&self.path, &bytes));
        if let Err(err) = result {
            tracing::warn!(error = %err, path = %self.path.display(), "cookie_file.save_failed");
        }
    }
}

impl CookieStore for PersistentCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<HeaderValue> = cookie_headers.cloned().collect();
        self.jar.set_cookies(&mut headers.iter(), url);

        for raw in headers.iter().filter_map(|value| value.to_str().ok()) {
            self.record(raw, url);
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

fn cookie_name(raw: &str) -> Option<&str> {
    let pair = raw.split(';').next()?;
    let (name, _) = pair.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// `Max-Age` of zero or less deletes the cookie.
fn is_removal(raw: &str) -> bool {
    raw.split(';').skip(1).any(|attr| {
        attr.split_once('=').is_some_and(|(key, value)| {
            key.trim().eq_ignore_ascii_case("max-age")
                && value.trim().parse::<i64>().is_ok_and(|secs| secs <= 0)
        })
    })
}
