//! Session authentication.
//!
//! An authenticator validates credentials against a [`RecordStore`],
//! persists the resulting [`SessionIdentity`] through a session store and
//! tracks the [`AuthState`] of the session.
//!
//! Both variants are generated from one macro: [`Authenticator`] over an
//! async [`SessionStore`](crate::storage::SessionStore) and
//! [`BlockingAuthenticator`] over a
//! [`BlockingSessionStore`](crate::storage::BlockingSessionStore).

use core::fmt;

/// Lifecycle state of a session.
///
/// ```text
/// Unauthenticated ──login──▶ Authenticating ──match──▶ Authenticated
///        ▲                        │                        │
///        └──── no match / error ──┘                        │
///        └──────────────────────── logout ─────────────────┘
/// ```
///
/// A new authenticator starts in [`AuthState::Authenticating`] until the
/// persisted session has been restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// No identity is held.
    Unauthenticated,
    /// A login or session restore is in progress.
    Authenticating,
    /// An identity is held.
    Authenticated,
}

impl AuthState {
    /// Returns the state name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for AuthState {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates an authenticator (async or blocking) over a session store
/// trait.
macro_rules! define_authenticator {
    (
        auth_name: $auth:ident,
        store_trait: $store_trait:ident,
        auth_doc: $auth_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $auth_doc]
        #[derive(Debug)]
        pub struct $auth<'rec, S> {
            /// Credential source.
            records: &'rec RecordStore,
            /// Persistence for the session blob.
            store: S,
            /// Current lifecycle state.
            state: AuthState,
            /// Identity held while authenticated.
            identity: Option<SessionIdentity>,
        }

        impl<'rec, S: $store_trait> $auth<'rec, S> {
            /// Creates an authenticator in the
            /// [`AuthState::Authenticating`] state.
            ///
            /// Call `restore_session` next to resolve it.
            #[inline]
            #[must_use]
            pub const fn new(records: &'rec RecordStore, store: S) -> Self {
                Self {
                    records,
                    store,
                    state: AuthState::Authenticating,
                    identity: None,
                }
            }

            /// Re-establishes the persisted session without re-checking
            /// credentials.
            ///
            /// A missing blob yields `None`. An unreadable or corrupt blob
            /// is logged and also yields `None`; it is left in place.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn restore_session(&mut self) -> Option<SessionIdentity> {
                self.state = AuthState::Authenticating;
                let restored = match self.store.load() $( .$await_ext )? {
                    Ok(Some(stored)) => {
                        let identity = stored.user.normalized();
                        tracing::info!(email = %identity.email, "session restored");
                        Some(identity)
                    }
                    Ok(None) => {
                        tracing::debug!("no persisted session");
                        None
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring unreadable session");
                        None
                    }
                };
                self.settle(restored.clone());
                restored
            }

            /// Validates the credentials and establishes a session.
            ///
            /// Returns `true` on success. See [`Self::try_login`] for the
            /// failure reasons.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn login(&mut self, email: &str, password: &str) -> bool {
                self.try_login(email, password) $( .$await_ext )? .is_ok()
            }

            /// Validates the credentials, persists the identity and marks
            /// the session authenticated.
            ///
            /// A failed attempt drops any previously held identity and
            /// clears the persisted session, so a later restore finds
            /// nothing either.
            ///
            /// # Errors
            ///
            /// Returns [`PortalError::MissingCredentials`] if either field
            /// is empty, [`PortalError::InvalidCredentials`] if no user
            /// matches both exactly, or the storage error if the identity
            /// cannot be persisted.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn try_login(
                &mut self,
                email: &str,
                password: &str,
            ) -> Result<SessionIdentity> {
                self.state = AuthState::Authenticating;
                let result = self.authenticate(email, password) $( .$await_ext )?;
                match result.as_ref() {
                    Ok(identity) => {
                        tracing::info!(email = %identity.email, "logged in");
                        self.settle(Some(identity.clone()));
                    }
                    Err(err) => {
                        tracing::info!(error = %err, "login rejected");
                        if let Err(clear_err) = self.store.clear() $( .$await_ext )? {
                            tracing::warn!(error = %clear_err, "failed to clear persisted session");
                        }
                        self.settle(None);
                    }
                }
                result
            }

            /// Clears the persisted session and drops the held identity.
            ///
            /// Safe to call when already logged out. A storage failure is
            /// logged; the in-memory session is torn down regardless. Use
            /// [`Self::try_logout`] to observe that failure.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn logout(&mut self) {
                if let Err(err) = self.try_logout() $( .$await_ext )? {
                    tracing::warn!(error = %err, "failed to clear persisted session");
                }
            }

            /// Like [`Self::logout`], but reports a storage failure.
            ///
            /// The in-memory session is torn down even when the error is
            /// returned.
            ///
            /// # Errors
            ///
            /// Returns the storage error if the persisted session could not
            /// be removed. It will be restored on the next start.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn try_logout(&mut self) -> Result<()> {
                let cleared = self.store.clear() $( .$await_ext )?;
                if let Some(identity) = self.identity.take() {
                    tracing::info!(email = %identity.email, "logged out");
                }
                self.state = AuthState::Unauthenticated;
                cleared
            }

            /// Current lifecycle state.
            #[inline]
            #[must_use]
            pub const fn state(&self) -> AuthState {
                self.state
            }

            /// Identity held by the session, if authenticated.
            #[inline]
            #[must_use]
            pub const fn identity(&self) -> Option<&SessionIdentity> {
                self.identity.as_ref()
            }

            /// Returns `true` while an identity is held.
            #[inline]
            #[must_use]
            pub fn is_authenticated(&self) -> bool {
                self.state == AuthState::Authenticated
            }

            /// Query context for the authenticated session.
            #[inline]
            #[must_use]
            pub fn portal(&self) -> Option<Portal<'_>> {
                self.identity
                    .as_ref()
                    .map(|identity| Portal::new(self.records, identity))
            }

            /// Underlying session store.
            #[inline]
            #[must_use]
            pub const fn store(&self) -> &S {
                &self.store
            }

            /// Checks the credentials and persists the identity.
            $($async_kw)? fn authenticate(
                &self,
                email: &str,
                password: &str,
            ) -> Result<SessionIdentity> {
                if email.is_empty() || password.is_empty() {
                    return Err(PortalError::MissingCredentials);
                }
                let user = self
                    .records
                    .find_user(email, password)
                    .ok_or(PortalError::InvalidCredentials)?;
                let identity = user.to_identity();
                let stored = StoredSession {
                    user: identity.clone(),
                };
                self.store.save(&stored) $( .$await_ext )? ?;
                Ok(identity)
            }

            /// Moves to the terminal state matching `identity`.
            fn settle(&mut self, identity: Option<SessionIdentity>) {
                self.state = if identity.is_some() {
                    AuthState::Authenticated
                } else {
                    AuthState::Unauthenticated
                };
                self.identity = identity;
            }
        }
    };
}

#[cfg(feature = "async")]
mod async_auth {
    //! Async authenticator.

    use super::AuthState;
    use crate::error::{PortalError, Result};
    use crate::models::{SessionIdentity, StoredSession};
    use crate::portal::Portal;
    use crate::records::RecordStore;
    use crate::storage::SessionStore;

    define_authenticator! {
        auth_name: Authenticator,
        store_trait: SessionStore,
        auth_doc: "Async session authenticator.\n\nStorage calls are the only suspension points.",
        async_kw: async,
        await_kw: await,
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::storage::InMemorySessionStore;

        const EMAIL: &str = "merchant1@shemeel.com";
        const PASSWORD: &str = "password123";

        fn records() -> RecordStore {
            RecordStore::sample().unwrap()
        }

        #[tokio::test]
        async fn login_and_restore() {
            let records = records();
            let mut auth = Authenticator::new(&records, InMemorySessionStore::new());
            assert_eq!(auth.restore_session().await, None);
            assert!(auth.login(EMAIL, PASSWORD).await);
            assert!(auth.is_authenticated());
            let raw = auth.store().raw().unwrap().unwrap();

            let mut fresh = Authenticator::new(&records, InMemorySessionStore::with_raw(raw));
            let identity = fresh.restore_session().await.unwrap();
            assert_eq!(identity.display_name, "ABC Retailers");
            assert_eq!(fresh.state(), AuthState::Authenticated);
        }

        #[tokio::test]
        async fn wrong_password_is_rejected() {
            let records = records();
            let mut auth = Authenticator::new(&records, InMemorySessionStore::new());
            let err = auth.try_login(EMAIL, "wrong").await.unwrap_err();
            assert!(matches!(err, PortalError::InvalidCredentials));
            assert_eq!(auth.state(), AuthState::Unauthenticated);
        }

        #[tokio::test]
        async fn failed_relogin_clears_store() {
            let records = records();
            let mut auth = Authenticator::new(&records, InMemorySessionStore::new());
            assert!(auth.login(EMAIL, PASSWORD).await);
            assert!(!auth.login(EMAIL, "wrong").await);
            assert!(auth.store().raw().unwrap().is_none());
            assert!(auth.identity().is_none());
        }

        #[tokio::test]
        async fn logout_clears_store() {
            let records = records();
            let mut auth = Authenticator::new(&records, InMemorySessionStore::new());
            assert!(auth.login(EMAIL, PASSWORD).await);
            auth.logout().await;
            auth.logout().await;
            assert!(auth.store().raw().unwrap().is_none());
            assert!(auth.identity().is_none());
        }
    }
}

#[cfg(feature = "blocking")]
mod blocking_auth {
    //! Blocking authenticator.

    use super::AuthState;
    use crate::error::{PortalError, Result};
    use crate::models::{SessionIdentity, StoredSession};
    use crate::portal::Portal;
    use crate::records::RecordStore;
    use crate::storage::BlockingSessionStore;

    define_authenticator! {
        auth_name: BlockingAuthenticator,
        store_trait: BlockingSessionStore,
        auth_doc: "Blocking session authenticator.",
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::MerchantId;
        #[cfg(feature = "storage-file")]
        use crate::storage::FileSessionStore;
        use crate::storage::InMemorySessionStore;

        const EMAIL: &str = "merchant1@shemeel.com";
        const PASSWORD: &str = "password123";

        fn records() -> RecordStore {
            RecordStore::sample().unwrap()
        }

        /// Store whose writes and deletes always fail.
        #[derive(Debug, Default)]
        struct BrokenStore;

        impl BlockingSessionStore for BrokenStore {
            fn load(&self) -> Result<Option<StoredSession>> {
                Err(PortalError::Storage("disk unavailable".into()))
            }

            fn save(&self, _session: &StoredSession) -> Result<()> {
                Err(PortalError::Storage("disk full".into()))
            }

            fn clear(&self) -> Result<()> {
                Err(PortalError::Storage("read-only".into()))
            }
        }

        #[test]
        fn starts_authenticating() {
            let records = records();
            let auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            assert_eq!(auth.state(), AuthState::Authenticating);
            assert!(!auth.is_authenticated());
            assert!(auth.portal().is_none());
        }

        #[test]
        fn restore_without_blob_is_unauthenticated() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            assert!(auth.restore_session().is_none());
            assert_eq!(auth.state(), AuthState::Unauthenticated);
        }

        #[test]
        fn login_with_valid_credentials() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            assert!(auth.login(EMAIL, PASSWORD));
            assert_eq!(auth.state(), AuthState::Authenticated);

            let identity = auth.identity().unwrap();
            assert_eq!(identity.email, EMAIL);
            assert_eq!(identity.merchant_id, Some(MerchantId::from("MID001")));
            assert_eq!(identity.accounts.len(), 3);
            assert!(auth.portal().is_some());
        }

        #[test]
        fn persisted_blob_has_no_password() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            assert!(auth.login(EMAIL, PASSWORD));
            let raw = auth.store().raw().unwrap().unwrap();
            assert!(raw.starts_with(r#"{"user":"#));
            assert!(!raw.contains(PASSWORD));
        }

        #[test]
        fn login_rejects_wrong_password() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            assert!(!auth.login(EMAIL, "wrong"));
            assert_eq!(auth.state(), AuthState::Unauthenticated);
            assert!(auth.store().raw().unwrap().is_none());
        }

        #[test]
        fn login_rejects_unknown_user() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            let err = auth.try_login("nobody@x.com", "x").unwrap_err();
            assert!(matches!(err, PortalError::InvalidCredentials));
        }

        #[test]
        fn login_requires_both_fields() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            let no_email = auth.try_login("", PASSWORD).unwrap_err();
            assert!(matches!(no_email, PortalError::MissingCredentials));
            let no_password = auth.try_login(EMAIL, "").unwrap_err();
            assert!(matches!(no_password, PortalError::MissingCredentials));
        }

        #[test]
        fn failed_login_clears_previous_session() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            assert!(auth.login(EMAIL, PASSWORD));
            assert!(!auth.login(EMAIL, "wrong"));
            assert!(auth.identity().is_none());
            assert_eq!(auth.state(), AuthState::Unauthenticated);
            assert!(auth.store().raw().unwrap().is_none());
        }

        #[cfg(feature = "storage-file")]
        #[test]
        fn fresh_process_after_failed_relogin_restores_nothing() {
            let records = records();
            let dir = tempfile::tempdir().unwrap();
            {
                let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
                let mut auth = BlockingAuthenticator::new(&records, store);
                assert!(auth.login(EMAIL, PASSWORD));
                assert!(!auth.login(EMAIL, "wrong"));
            }
            let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
            let mut fresh = BlockingAuthenticator::new(&records, store);
            assert!(fresh.restore_session().is_none());
            assert_eq!(fresh.state(), AuthState::Unauthenticated);
        }

        #[test]
        fn failed_persist_leaves_session_unauthenticated() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, BrokenStore);
            let err = auth.try_login(EMAIL, PASSWORD).unwrap_err();
            assert!(matches!(err, PortalError::Storage(_)));
            assert_eq!(auth.state(), AuthState::Unauthenticated);
            assert!(auth.identity().is_none());
        }

        #[test]
        fn unreadable_store_restores_nothing() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, BrokenStore);
            assert!(auth.restore_session().is_none());
            assert_eq!(auth.state(), AuthState::Unauthenticated);
        }

        #[test]
        fn logout_survives_storage_failure() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, BrokenStore);
            auth.logout();
            assert_eq!(auth.state(), AuthState::Unauthenticated);
        }

        #[test]
        fn try_logout_reports_storage_failure() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, BrokenStore);
            let err = auth.try_logout().unwrap_err();
            assert!(matches!(err, PortalError::Storage(_)));
            assert_eq!(auth.state(), AuthState::Unauthenticated);
            assert!(auth.identity().is_none());
        }

        #[test]
        fn logout_is_idempotent() {
            let records = records();
            let mut auth = BlockingAuthenticator::new(&records, InMemorySessionStore::new());
            auth.logout();
            assert!(auth.login(EMAIL, PASSWORD));
            auth.logout();
            auth.logout();
            assert_eq!(auth.state(), AuthState::Unauthenticated);
            assert!(auth.store().raw().unwrap().is_none());
        }

        #[cfg(feature = "storage-file")]
        #[test]
        fn fresh_process_after_logout_restores_nothing() {
            let records = records();
            let dir = tempfile::tempdir().unwrap();
            {
                let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
                let mut auth = BlockingAuthenticator::new(&records, store);
                assert!(auth.login(EMAIL, PASSWORD));
                auth.logout();
            }
            let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
            let mut fresh = BlockingAuthenticator::new(&records, store);
            assert!(fresh.restore_session().is_none());
            assert_eq!(fresh.state(), AuthState::Unauthenticated);
        }

        #[cfg(feature = "storage-file")]
        #[test]
        fn fresh_process_restores_login() {
            let records = records();
            let dir = tempfile::tempdir().unwrap();
            {
                let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
                let mut auth = BlockingAuthenticator::new(&records, store);
                assert!(auth.login(EMAIL, PASSWORD));
            }
            let store = FileSessionStore::new(dir.path().to_path_buf()).unwrap();
            let mut fresh = BlockingAuthenticator::new(&records, store);
            let identity = fresh.restore_session().unwrap();
            assert_eq!(identity.email, EMAIL);
            assert!(fresh.is_authenticated());
        }

        #[test]
        fn corrupt_blob_restores_nothing() {
            let records = records();
            let store = InMemorySessionStore::with_raw("{\"user\": \"oops\"");
            let mut auth = BlockingAuthenticator::new(&records, store);
            assert!(auth.restore_session().is_none());
            assert_eq!(auth.state(), AuthState::Unauthenticated);
            assert!(auth.store().raw().unwrap().is_some());
        }

        #[test]
        fn auth_state_display() {
            assert_eq!(AuthState::Authenticating.to_string(), "authenticating");
        }
    }
}

#[cfg(feature = "async")]
pub use async_auth::Authenticator;
#[cfg(feature = "blocking")]
pub use blocking_auth::BlockingAuthenticator;
