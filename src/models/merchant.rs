//! Merchant account (MID) and terminal (TID) models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AccountStatus, MerchantId, TerminalId};

/// A merchant account (MID) with the terminals registered under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAccount {
    /// Merchant identifier.
    #[serde(rename = "mid")]
    pub merchant_id: MerchantId,
    /// Acceptance channel (`ECOM`, `POS`, `SoftPOS`, ...).
    pub payment_channel: String,
    /// Account status.
    pub status: AccountStatus,
    /// Date the account was opened.
    pub created_date: NaiveDate,
    /// Lifetime transaction count as reported by the acquirer.
    #[serde(rename = "totalTransactions")]
    pub total_transaction_count: u64,
    /// Terminals owned by this account, in registration order.
    #[serde(rename = "tids", default)]
    pub terminals: Vec<TerminalRecord>,
}

impl MerchantAccount {
    /// Looks up one of this account's terminals.
    #[inline]
    #[must_use]
    pub fn terminal(&self, terminal_id: &TerminalId) -> Option<&TerminalRecord> {
        self.terminals
            .iter()
            .find(|terminal| terminal.terminal_id == *terminal_id)
    }

    /// Number of terminals in [`AccountStatus::Active`].
    #[inline]
    #[must_use]
    pub fn active_terminal_count(&self) -> usize {
        self.terminals
            .iter()
            .filter(|terminal| terminal.status.is_active())
            .count()
    }
}

/// A terminal (TID) registered under a merchant account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalRecord {
    /// Terminal identifier.
    #[serde(rename = "tid")]
    pub terminal_id: TerminalId,
    /// Terminal status.
    pub status: AccountStatus,
    /// Date the terminal went live.
    pub activation_date: NaiveDate,
    /// Lifetime transaction count for this terminal.
    #[serde(rename = "totalTransactions")]
    pub total_transaction_count: u64,
}
