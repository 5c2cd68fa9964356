//! Pluggable storage backends for the persisted session blob.
//!
//! The blob is a single JSON document, `{ "user": SessionIdentity }`,
//! stored under the fixed key [`SESSION_KEY`]. This module defines the
//! [`SessionStore`] (async) and [`BlockingSessionStore`] (blocking) traits
//! via a shared macro, mirroring the authenticator generation pattern in
//! [`crate::auth`].

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

/// Key under which the session blob is stored.
pub const SESSION_KEY: &str = "authData";

/// Generates a session store trait (async or blocking).
///
/// Uses `@methods` to define the method list once, and `@method` to render
/// each method in async (`impl Future + Send`) or blocking (`fn`) style.
macro_rules! define_session_store {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_session_store!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_session_store!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        define_session_store!(@method $mode, load,
            "Reads the persisted session.\n\nReturns `Ok(None)` if nothing is stored.\n\n# Errors\n\nReturns an error if the backend cannot be read or the stored blob cannot be deserialized.",
            -> Result<Option<StoredSession>>);
        define_session_store!(@method $mode, save,
            "Persists the session, replacing any previous one.\n\n# Errors\n\nReturns an error if the backend fails to write.",
            session: &StoredSession, -> Result<()>);
        define_session_store!(@method $mode, clear,
            "Deletes the persisted session. Clearing an empty store succeeds.\n\n# Errors\n\nReturns an error if the backend fails to delete.",
            -> Result<()>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_store {
    //! Async session store trait definition.

    use crate::error::Result;
    use crate::models::StoredSession;

    define_session_store! {
        trait_name: SessionStore,
        trait_doc: "Async backend for the persisted session blob.\n\nAll methods take `&self`; implementations use interior mutability\n(e.g. `Mutex`) for mutation.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_store {
    //! Blocking session store trait definition.

    use crate::error::Result;
    use crate::models::StoredSession;

    define_session_store! {
        trait_name: BlockingSessionStore,
        trait_doc: "Blocking backend for the persisted session blob.\n\nAll methods take `&self`; implementations use interior mutability\n(e.g. `Mutex`) for mutation.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_store::SessionStore;
#[cfg(feature = "blocking")]
pub use blocking_store::BlockingSessionStore;
