//! Mock implementations of common traits

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::auth::{TokenPersistence, TokenStorageError};

/// In-memory token backend that records how it was used.
#[derive(Debug, Default)]
pub struct MockTokenPersistence {
    stored: Mutex<Option<String>>,
    fail_all: AtomicBool,
    fail_removals: AtomicBool,
    loads: AtomicUsize,
    saves: AtomicUsize,
    removes: AtomicUsize,
}

impl MockTokenPersistence {
    /// Empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `token`, as after a previous run.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let mock = Self::default();
        *mock.stored.lock() = Some(token.to_string());
        mock
    }

    /// Backend whose every operation fails.
    #[must_use]
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.fail_all.store(true, Ordering::SeqCst);
        mock
    }

    /// Make `remove` fail while `load`/`save` keep working.
    pub fn fail_removals(&self, enabled: bool) {
        self.fail_removals.store(enabled, Ordering::SeqCst);
    }

    /// Token currently held by the backend.
    #[must_use]
    pub fn stored(&self) -> Option<String> {
        self.stored.lock().clone()
    }

    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    fn check(&self, extra_failure: bool) -> Result<(), TokenStorageError> {
        if extra_failure || self.fail_all.load(Ordering::SeqCst) {
            Err(TokenStorageError::Unavailable("mock storage failure".into()))
        } else {
            Ok(())
        }
    }
}

impl TokenPersistence for MockTokenPersistence {
    fn load(&self) -> Result<Option<String>, TokenStorageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.check(false)?;
        Ok(self.stored.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check(false)?;
        *self.stored.lock() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenStorageError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.check(self.fail_removals.load(Ordering::SeqCst))?;
        *self.stored.lock() = None;
        Ok(())
    }
}
