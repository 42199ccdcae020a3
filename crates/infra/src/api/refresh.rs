//! Single-flight access token refresh
//!
//! Concurrent callers that need a new token share one `POST /auth/refresh`.
//! The in-flight request is held as a shared future behind a mutex; the slot
//! is emptied when the request settles, whatever its outcome, so the next
//! 401 starts a fresh attempt.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use roster_domain::constants::AUTH_REFRESH;
use roster_domain::AccessGrant;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use crate::http::{Credentials, Exchange, RequestExecutor, RequestOptions, RequestSpec};

type InFlight = Shared<BoxFuture<'static, bool>>;

/// Empties the in-flight slot when the refresh task ends, including on
/// panic or when the runtime drops the task unpolled.
struct ClearOnDrop(Arc<Mutex<Option<InFlight>>>);

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        self.0.lock().take();
    }
}

/// Exchanges the session cookie for a new access token, at most one request
/// at a time.
#[derive(Clone)]
pub struct RefreshCoordinator {
    executor: RequestExecutor,
    in_flight: Arc<Mutex<Option<InFlight>>>,
}

impl RefreshCoordinator {
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor, in_flight: Arc::new(Mutex::new(None)) }
    }

    /// Refresh the access token, joining a refresh already in flight.
    ///
    /// Resolves `true` only when the server answered `code == 0` with a
    /// non-empty access token, which is then stored. Every other outcome,
    /// transport errors included, resolves `false`.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let (outcome, started) = {
            let mut slot = self.in_flight.lock();
            match slot.as_ref() {
                Some(existing) => (existing.clone(), None),
                None => {
                    let (tx, rx) = oneshot::channel();
                    let shared = async move { rx.await.unwrap_or(false) }.boxed().shared();
                    *slot = Some(shared.clone());
                    (shared, Some(tx))
                }
            }
        };

        match started {
            Some(tx) => {
                info!("token refresh started");
                self.spawn(tx);
            }
            None => debug!("joining in-flight token refresh"),
        }

        outcome.await
    }

    /// `true` while a refresh request is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    // The slot lock is released before spawning: a task the runtime
    // rejects is dropped on this thread and its guard locks the slot.
    fn spawn(&self, tx: oneshot::Sender<bool>) {
        let executor = self.executor.clone();
        let guard = ClearOnDrop(Arc::clone(&self.in_flight));

        tokio::spawn(async move {
            let refreshed = perform_refresh(&executor).await;
            drop(guard);
            info!(refreshed, "token refresh finished");
            let _ = tx.send(refreshed);
        });
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator").field("in_flight", &self.is_in_flight()).finish()
    }
}

async fn perform_refresh(executor: &RequestExecutor) -> bool {
    let spec = RequestSpec::post(AUTH_REFRESH, None);
    let options = RequestOptions::default().credentials(Credentials::Include).without_bearer();

    let exchange: Exchange<AccessGrant> = match executor.execute(&spec, &options).await {
        Ok(exchange) => exchange,
        Err(err) => {
            warn!(error = %err, "token refresh request failed");
            return false;
        }
    };

    let Exchange { status, envelope } = exchange;
    if !envelope.is_success() {
        warn!(%status, code = envelope.code, message = %envelope.message, "token refresh rejected");
        return false;
    }

    match envelope.data.filter(AccessGrant::has_token) {
        Some(grant) => {
            executor.tokens().set(grant.access_token);
            true
        }
        None => {
            warn!("token refresh response carried no access token");
            false
        }
    }
}
