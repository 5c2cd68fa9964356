//! Merchant portal library.
//!
//! Browses merchant accounts (MIDs), their terminals (TIDs) and payment
//! transactions held in a static record set, behind a persisted login
//! session.
//!
//! - [`records`]: read-only record store loaded from JSON.
//! - [`auth`]: login, logout and session restore over a pluggable
//!   [`storage`] backend.
//! - [`filter`]: transaction filtering, search and date presets.
//! - [`portal`]: per-session query context.

pub mod auth;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod portal;
pub mod records;
pub mod storage;
