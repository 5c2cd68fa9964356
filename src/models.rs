//! Data models for merchant portal records.
//!
//! This module contains strongly-typed representations of merchant
//! accounts, terminals, transactions and users, newtype ID wrappers, and
//! enumeration types for constrained values.

mod enums;
mod ids;
mod merchant;
mod summary;
mod transaction;
mod user;

pub use chrono::NaiveDate;
pub use enums::{AccountStatus, ParseStatusError, TransactionStatus, TransactionType};
pub use ids::{MerchantId, TerminalId, TransactionId};
pub use merchant::{MerchantAccount, TerminalRecord};
pub use rust_decimal::Decimal;
pub use summary::Summary;
pub use transaction::Transaction;
pub use user::{SessionIdentity, StoredSession, UserRecord};
