//! In-memory session store for testing.
//!
//! Provides [`InMemorySessionStore`], a thread-safe implementation of the
//! session store traits. The blob is kept as serialized JSON so tests can
//! seed it with arbitrary (including corrupt) contents.

use std::sync::Mutex;

#[cfg(feature = "async")]
use core::future::{self, Future};

use crate::error::{PortalError, Result};
use crate::models::StoredSession;

/// Thread-safe in-memory session store.
///
/// This type implements both [`super::SessionStore`] (async) and
/// [`super::BlockingSessionStore`] (blocking).
///
/// # Example
///
/// ```rust
/// use merchant_portal::storage::InMemorySessionStore;
///
/// let store = InMemorySessionStore::new();
/// assert!(store.raw().unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    /// Serialized blob, if any.
    blob: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    /// Creates a new empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw blob.
    #[inline]
    #[must_use]
    pub fn with_raw<T: Into<String>>(blob: T) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Returns the raw stored blob.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Storage`] if the internal lock is poisoned.
    #[inline]
    pub fn raw(&self) -> Result<Option<String>> {
        self.with_lock(|blob| blob.clone())
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut Option<String>) -> R>(&self, op: F) -> Result<R> {
        let mut blob = self.blob.lock().map_err(|err| lock_error(&err))?;
        Ok(op(&mut blob))
    }

    /// Deserializes the stored blob.
    fn read_session(&self) -> Result<Option<StoredSession>> {
        self.raw()?
            .map(|json| serde_json::from_str(&json).map_err(PortalError::from))
            .transpose()
    }

    /// Serializes and stores the session.
    fn write_session(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.with_lock(|blob| *blob = Some(json))
    }

    /// Drops the stored blob.
    fn remove_session(&self) -> Result<()> {
        self.with_lock(|blob| *blob = None)
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> PortalError {
    PortalError::Storage(err.to_string().into())
}

// ── BlockingSessionStore implementation ─────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingSessionStore for InMemorySessionStore {
    #[inline]
    fn load(&self) -> Result<Option<StoredSession>> {
        self.read_session()
    }

    #[inline]
    fn save(&self, session: &StoredSession) -> Result<()> {
        self.write_session(session)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.remove_session()
    }
}

// ── SessionStore (async) implementation ─────────────────────────────────

#[cfg(feature = "async")]
impl super::SessionStore for InMemorySessionStore {
    #[inline]
    fn load(&self) -> impl Future<Output = Result<Option<StoredSession>>> + Send {
        future::ready(self.read_session())
    }

    #[inline]
    fn save(&self, session: &StoredSession) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.write_session(session))
    }

    #[inline]
    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.remove_session())
    }
}
