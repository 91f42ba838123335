//! Mock token store for testing.

use crate::error::{Result, StoreError};
use crate::providers::TokenStore;
use booking_gateway_core::{Session, UserFlags};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    session: Option<Session>,
    flags: UserFlags,
    failure: Option<StoreError>,
    clear_failure: Option<StoreError>,
    clears: usize,
}

/// Mock token store.
///
/// In-memory store for tests. Clones share state, so a test can keep one
/// handle while the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTokenStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.lock().session = Some(session);
        store
    }

    /// Make every subsequent operation fail with `error`.
    pub fn fail_with(&self, error: StoreError) {
        self.lock().failure = Some(error);
    }

    /// Make only `clear()` fail with `error`; reads and writes keep working.
    pub fn fail_clears_with(&self, error: StoreError) {
        self.lock().clear_failure = Some(error);
    }

    /// Current session, bypassing the trait (for assertions).
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// How many times `clear()` has run.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.lock().clears
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self) -> Result<MutexGuard<'_, Inner>> {
        let inner = self.lock();
        match &inner.failure {
            Some(err) => Err(err.clone()),
            None => Ok(inner),
        }
    }
}

impl TokenStore for MockTokenStore {
    async fn save(&self, session: &Session) -> Result<()> {
        self.check()?.session = Some(session.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.check()?.session.clone().filter(Session::is_usable))
    }

    async fn clear(&self) -> Result<()> {
        let mut inner = self.check()?;
        if let Some(err) = &inner.clear_failure {
            return Err(err.clone());
        }
        inner.session = None;
        inner.flags = UserFlags::default();
        inner.clears += 1;
        Ok(())
    }

    async fn flags(&self) -> Result<UserFlags> {
        Ok(self.check()?.flags)
    }

    async fn set_flags(&self, flags: UserFlags) -> Result<()> {
        self.check()?.flags = flags;
        Ok(())
    }
}
