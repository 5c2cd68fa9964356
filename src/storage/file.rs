//! JSON-file-based session store.
//!
//! Stores the session blob as `<dir>/authData.json` under a configurable
//! directory (default: `$XDG_DATA_HOME/merchant-portal/`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{PortalError, Result};
use crate::models::StoredSession;

use super::SESSION_KEY;

/// Application name used for the XDG data directory.
const APP_NAME: &str = "merchant-portal";

/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "session.lock";

/// File-backed session store.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `session.lock`. Reads take a shared lock, writes an exclusive one.
///
/// # File layout
///
/// ```text
/// <dir>/
///   session.lock          (cross-process lock sentinel)
///   authData.json         (present only while logged in)
/// ```
#[derive(Debug)]
pub struct FileSessionStore {
    /// Directory containing the session files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileSessionStore {
    /// Creates a store rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist, and opens
    /// (or creates) the lock sentinel.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        tracing::debug!(dir = %dir.display(), "opened session store");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this application.
    ///
    /// On Linux: `$XDG_DATA_HOME/merchant-portal/` (typically
    /// `~/.local/share/merchant-portal/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                PortalError::Storage("could not determine platform data directory".into())
            })
    }

    /// Path of the session blob.
    #[inline]
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(format!("{SESSION_KEY}.json"))
    }

    /// Directory this store writes to.
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Acquires an in-process mutex guard and a shared (read) file lock,
    /// executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // An operation error takes precedence over an unlock error.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write) file
    /// lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads and deserializes the blob. Returns `None` if the file does
    /// not exist.
    fn read_session(&self) -> Result<Option<StoredSession>> {
        self.with_shared_lock(|| match fs::read_to_string(self.session_path()) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(PortalError::from),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        })
    }

    /// Atomically writes the blob (write-to-tmp then rename).
    fn write_session(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        self.with_exclusive_lock(|| {
            let path = self.session_path();
            let tmp_path = self.dir.join(format!("{SESSION_KEY}.json.tmp"));
            fs::write(&tmp_path, json).map_err(storage_io_error)?;
            fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
            tracing::debug!(path = %path.display(), "session written");
            Ok(())
        })
    }

    /// Deletes the blob. A missing file is not an error.
    ///
    /// The lock sentinel is preserved; it is infrastructure, not data.
    fn remove_session(&self) -> Result<()> {
        self.with_exclusive_lock(|| match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_io_error(err)),
        })
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`PortalError::Storage`].
fn storage_io_error(err: io::Error) -> PortalError {
    PortalError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`PortalError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> PortalError {
    PortalError::Storage(err.to_string().into())
}

// ── BlockingSessionStore implementation ─────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingSessionStore for FileSessionStore {
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
impl super::SessionStore for FileSessionStore {
    #[inline]
    fn load(&self) -> impl Future<Output = Result<Option<StoredSession>>> + Send {
        core::future::ready(self.read_session())
    }

    #[inline]
    fn save(&self, session: &StoredSession) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.write_session(session))
    }

    #[inline]
    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.remove_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionIdentity;

    /// Helper to create a [`FileSessionStore`] in a temporary directory.
    fn temp_store() -> (FileSessionStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
        (store, dir)
    }

    fn test_session() -> StoredSession {
        StoredSession {
            user: SessionIdentity::new(
                "merchant1@shemeel.com".to_owned(),
                "ABC Retailers".to_owned(),
                Vec::new(),
            ),
        }
    }

    #[test]
    fn new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileSessionStore::new(nested.clone()).unwrap();
        assert!(nested.join(LOCK_FILE).exists());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn session_path_uses_fixed_key() {
        let (store, dir) = temp_store();
        assert_eq!(store.session_path(), dir.path().join("authData.json"));
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        if let Ok(dir) = FileSessionStore::default_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[cfg(feature = "blocking")]
    mod blocking {
        use super::*;
        use crate::storage::BlockingSessionStore;

        #[test]
        fn load_without_file_is_none() {
            let (store, _dir) = temp_store();
            assert!(store.load().unwrap().is_none());
        }

        #[test]
        fn save_then_load() {
            let (store, _dir) = temp_store();
            store.save(&test_session()).unwrap();
            assert_eq!(store.load().unwrap(), Some(test_session()));
            assert!(!store.dir().join("authData.json.tmp").exists());
        }

        #[test]
        fn saved_blob_omits_password() {
            let (store, _dir) = temp_store();
            store.save(&test_session()).unwrap();
            let raw = fs::read_to_string(store.session_path()).unwrap();
            assert!(raw.contains("\"user\""));
            assert!(!raw.contains("password"));
        }

        #[test]
        fn clear_removes_file_and_is_idempotent() {
            let (store, _dir) = temp_store();
            store.save(&test_session()).unwrap();
            store.clear().unwrap();
            assert!(!store.session_path().exists());
            store.clear().unwrap();
            assert!(store.dir().join(LOCK_FILE).exists());
        }

        #[test]
        fn corrupt_file_is_a_serialization_error() {
            let (store, _dir) = temp_store();
            fs::write(store.session_path(), "{\"user\": 42}").unwrap();
            let err = store.load().unwrap_err();
            assert!(matches!(err, PortalError::Serialization(_)));
        }

        #[test]
        fn survives_reopen() {
            let (store, dir) = temp_store();
            store.save(&test_session()).unwrap();
            drop(store);
            let reopened = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(reopened.load().unwrap(), Some(test_session()));
        }
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;
        use crate::storage::SessionStore;

        #[tokio::test]
        async fn save_load_clear() {
            let (store, _dir) = temp_store();
            assert!(store.load().await.unwrap().is_none());
            store.save(&test_session()).await.unwrap();
            assert_eq!(store.load().await.unwrap(), Some(test_session()));
            store.clear().await.unwrap();
            assert!(store.load().await.unwrap().is_none());
        }
    }
}
