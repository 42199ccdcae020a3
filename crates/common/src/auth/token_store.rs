//! Access token store
//!
//! Single owner of the bearer token and the role decoded from it:
//! - One-time hydration from durable storage on first read
//! - Best-effort persistence on set/clear (failures are logged, not surfaced)
//! - Change notifications for views that depend on the session

use std::sync::{Arc, Once};

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::role::{decode_role, Role};
use super::traits::TokenPersistence;
use super::types::AuthChange;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Token and role are replaced together so readers never see one without the
/// other.
struct Session {
    token: String,
    role: Option<Role>,
}

/// Thread-safe holder of the current access token.
///
/// The role is never set directly: it is recomputed from the token on every
/// `set` and dropped on `clear`.
pub struct TokenStore {
    session: RwLock<Option<Session>>,
    hydration: Once,
    persistence: Option<Arc<dyn TokenPersistence>>,
    changes: broadcast::Sender<AuthChange>,
}

impl TokenStore {
    /// Store without a durable copy; the token lives as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::build(None)
    }

    /// Store backed by `persistence`.
    ///
    /// Nothing is read until the first `get`/`role` call.
    #[must_use]
    pub fn with_persistence(persistence: Arc<dyn TokenPersistence>) -> Self {
        Self::build(Some(persistence))
    }

    fn build(persistence: Option<Arc<dyn TokenPersistence>>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { session: RwLock::new(None), hydration: Once::new(), persistence, changes }
    }

    /// Current token, hydrating from durable storage on the first miss.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        if let Some(session) = self.session.read().as_ref() {
            return Some(session.token.clone());
        }

        self.hydrate();
        self.session.read().as_ref().map(|session| session.token.clone())
    }

    /// Store `token`, cache its role and persist it.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let role = decode_role(&token);

        // A token set in this process always wins over whatever is on disk.
        self.hydration.call_once(|| {});
        *self.session.write() = Some(Session { token: token.clone(), role });

        if let Some(persistence) = &self.persistence {
            if let Err(err) = persistence.save(&token) {
                warn!(error = %err, "failed to persist access token");
            }
        }

        info!(role = ?role, "access token stored");
        let _ = self.changes.send(AuthChange::SignedIn { role });
    }

    /// Drop the token and role, and remove the durable copy.
    pub fn clear(&self) {
        self.hydration.call_once(|| {});
        let had_session = self.session.write().take().is_some();

        if let Some(persistence) = &self.persistence {
            if let Err(err) = persistence.remove() {
                warn!(error = %err, "failed to remove persisted access token");
            }
        }

        if had_session {
            info!("access token cleared");
        }
        let _ = self.changes.send(AuthChange::SignedOut);
    }

    /// Role decoded from the current token.
    ///
    /// Triggers hydration, so the answer is trustworthy even before the
    /// first `get`.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.hydrate();
        self.session.read().as_ref().and_then(|session| session.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Receive every subsequent `set`/`clear`.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }

    fn hydrate(&self) {
        self.hydration.call_once(|| {
            let Some(persistence) = &self.persistence else {
                return;
            };

            match persistence.load() {
                Ok(Some(token)) => {
                    let role = decode_role(&token);
                    let mut session = self.session.write();
                    if session.is_none() {
                        debug!(role = ?role, "access token hydrated from durable storage");
                        *session = Some(Session { token, role });
                    }
                }
                Ok(None) => debug!("no persisted access token"),
                Err(err) => warn!(error = %err, "failed to load persisted access token"),
            }
        });
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session.read();
        f.debug_struct("TokenStore")
            .field("has_token", &session.is_some())
            .field("role", &session.as_ref().and_then(|s| s.role))
            .field("persistent", &self.persistence.is_some())
            .finish()
    }
}
