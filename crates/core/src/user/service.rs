//! Current user service - resolves who is signed in

use std::sync::Arc;

use roster_common::TokenStore;
use roster_domain::UserProfile;
use tracing::{debug, warn};

use super::ports::ProfileSource;

/// Resolves the signed-in user's profile.
///
/// Every failure (no token, refused request, unreachable backend) resolves to
/// `None`: views treat "unknown user" and "signed out" alike.
pub struct CurrentUserService {
    tokens: Arc<TokenStore>,
    source: Arc<dyn ProfileSource>,
}

impl CurrentUserService {
    /// Create a new current-user service
    pub fn new(tokens: Arc<TokenStore>, source: Arc<dyn ProfileSource>) -> Self {
        Self { tokens, source }
    }

    /// Profile of the current session.
    ///
    /// No request is made when the store holds no token.
    pub async fn current_user(&self) -> Option<UserProfile> {
        if self.tokens.get().is_none() {
            debug!("no access token, skipping profile lookup");
            return None;
        }

        match self.source.fetch_profile().await {
            Ok(envelope) if envelope.is_success() => envelope.data,
            Ok(envelope) => {
                debug!(code = envelope.code, message = %envelope.message, "profile lookup refused");
                None
            }
            Err(err) => {
                warn!(error = %err, "profile lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use roster_domain::{Envelope, Result, RosterError};

    use super::*;

    struct StubSource {
        response: Result<Envelope<UserProfile>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(response: Result<Envelope<UserProfile>>) -> Arc<Self> {
            Arc::new(Self { response, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl ProfileSource for StubSource {
        async fn fetch_profile(&self) -> Result<Envelope<UserProfile>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn alice() -> UserProfile {
        UserProfile {
            id: uuid::Uuid::nil(),
            username: "alice".into(),
            role: "admin".into(),
            is_active: true,
            token_version: 1,
        }
    }

    fn signed_in() -> Arc<TokenStore> {
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set("opaque");
        tokens
    }

    #[tokio::test]
    async fn skips_lookup_without_token() {
        let source = StubSource::new(Ok(Envelope::success(alice())));
        let service = CurrentUserService::new(Arc::new(TokenStore::in_memory()), source.clone());

        assert_eq!(service.current_user().await, None);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn returns_profile_on_success() {
        let source = StubSource::new(Ok(Envelope::success(alice())));
        let service = CurrentUserService::new(signed_in(), source.clone());

        assert_eq!(service.current_user().await.map(|u| u.username), Some("alice".to_string()));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refused_or_failed_lookup_is_none() {
        let refused = CurrentUserService::new(
            signed_in(),
            StubSource::new(Ok(Envelope::unauthorized())),
        );
        assert_eq!(refused.current_user().await, None);

        let unreachable = CurrentUserService::new(
            signed_in(),
            StubSource::new(Err(RosterError::Network("connection refused".into()))),
        );
        assert_eq!(unreachable.current_user().await, None);
    }
}
