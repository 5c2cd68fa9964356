//! Error types for the merchant portal library.

/// All errors that can occur inside the merchant portal library.
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage backend failed.
    #[error("session storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// The record set could not be loaded.
    #[error("failed to load records: {0}")]
    Records(String),

    /// Email or password was left empty.
    #[error("please enter both email and password")]
    MissingCredentials,

    /// No user matches the given email and password.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = core::result::Result<T, PortalError>;
