//! Read-only record store.
//!
//! Holds the users, transactions and summary counters of a record set.
//! The store is loaded once and never mutated.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PortalError, Result};
use crate::models::{Summary, Transaction, TransactionId, UserRecord};

/// Sample record set compiled into the binary.
const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// On-disk layout of a record set.
#[derive(Debug, Deserialize)]
struct RecordSet {
    /// Users with their credentials and merchant accounts.
    #[serde(default)]
    users: Vec<UserRecord>,
    /// Flat list of transactions across all merchants.
    #[serde(default)]
    transactions: Vec<Transaction>,
    /// Stored aggregate counters.
    #[serde(default)]
    summary: Summary,
}

/// Immutable reference data for a portal session.
#[derive(Debug)]
pub struct RecordStore {
    /// Known users.
    users: Vec<UserRecord>,
    /// All transactions, in record-set order.
    transactions: Vec<Transaction>,
    /// Stored aggregate counters.
    summary: Summary,
}

impl RecordStore {
    /// Parses a record set from JSON with top-level `users`,
    /// `transactions` and `summary` keys.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Serialization`] if the JSON does not match
    /// the record-set layout.
    #[inline]
    pub fn from_json(json: &str) -> Result<Self> {
        let set: RecordSet = serde_json::from_str(json)?;
        tracing::debug!(
            users = set.users.len(),
            transactions = set.transactions.len(),
            "loaded record set"
        );
        Ok(Self {
            users: set.users,
            transactions: set.transactions,
            summary: set.summary,
        })
    }

    /// Reads and parses a record set from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Records`] if the file cannot be read, or
    /// [`PortalError::Serialization`] if it cannot be parsed.
    #[inline]
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| PortalError::Records(format!("{}: {err}", path.display())))?;
        Self::from_json(&contents)
    }

    /// Loads the sample record set bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Serialization`] if the bundled JSON is
    /// malformed.
    #[inline]
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_JSON)
    }

    /// Finds the user whose email and password both match exactly.
    #[inline]
    #[must_use]
    pub fn find_user(&self, email: &str, password: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.matches(email, password))
    }

    /// Returns all users.
    #[inline]
    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Returns all transactions in record-set order.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Looks up a transaction by ID.
    #[inline]
    #[must_use]
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        let found = self.transactions.iter().find(|tx| tx.id == *id);
        if found.is_none() {
            tracing::debug!(transaction_id = %id, "transaction not found");
        }
        found
    }

    /// Returns the stored aggregate counters.
    #[inline]
    #[must_use]
    pub const fn summary(&self) -> &Summary {
        &self.summary
    }
}
