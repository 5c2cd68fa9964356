//! Query context for an authenticated session.
//!
//! [`Portal`] pairs the read-only [`RecordStore`] with the caller's
//! [`SessionIdentity`] and answers the questions each portal view asks:
//! which accounts exist, what a merchant or terminal looks like, and which
//! transactions match a filter. Lookups that find nothing return `None`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::filter::{FilterScope, TransactionFilter, sort_newest_first};
use crate::models::{
    MerchantAccount, MerchantId, SessionIdentity, Summary, TerminalId, TerminalRecord,
    Transaction, TransactionId,
};
use crate::records::RecordStore;

/// Number of transactions shown in dashboard and detail previews.
pub const PREVIEW_LIMIT: usize = 3;

/// Merchant account with its transactions, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantOverview<'rec> {
    /// The account.
    pub account: &'rec MerchantAccount,
    /// Transactions taken on the account.
    pub transactions: Vec<Transaction>,
}

impl MerchantOverview<'_> {
    /// Number of terminals under the account.
    #[inline]
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.account.terminals.len()
    }
}

/// Terminal with its transactions and headline figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalOverview<'rec> {
    /// Owning merchant account.
    pub account: &'rec MerchantAccount,
    /// The terminal.
    pub terminal: &'rec TerminalRecord,
    /// Transactions taken on the terminal, newest first.
    pub transactions: Vec<Transaction>,
    /// Sum of successful payment amounts.
    pub success_volume: Decimal,
    /// Share of successful payments in whole percent, `0` when there are
    /// no transactions.
    pub success_rate: Decimal,
}

/// Headline figures for the landing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Merchant display name of the session.
    pub merchant_name: String,
    /// Stored aggregate counters.
    pub summary: Summary,
    /// Number of merchant accounts.
    pub total_merchants: usize,
    /// Number of active merchant accounts.
    pub active_merchants: usize,
    /// Number of terminals across all accounts.
    pub total_terminals: usize,
    /// Number of active terminals across all accounts.
    pub active_terminals: usize,
    /// Most recent transactions, newest first.
    pub recent: Vec<Transaction>,
}

/// Read-only view over the records for one session identity.
#[derive(Debug, Clone, Copy)]
pub struct Portal<'rec> {
    /// Reference data.
    records: &'rec RecordStore,
    /// Authenticated identity.
    identity: &'rec SessionIdentity,
}

impl<'rec> Portal<'rec> {
    /// Creates a portal for `identity` over `records`.
    #[inline]
    #[must_use]
    pub const fn new(records: &'rec RecordStore, identity: &'rec SessionIdentity) -> Self {
        Self { records, identity }
    }

    /// The session identity.
    #[inline]
    #[must_use]
    pub const fn identity(&self) -> &'rec SessionIdentity {
        self.identity
    }

    /// The underlying record store.
    #[inline]
    #[must_use]
    pub const fn records(&self) -> &'rec RecordStore {
        self.records
    }

    /// Merchant accounts visible to the session, in record order.
    #[inline]
    #[must_use]
    pub fn accounts(&self) -> &'rec [MerchantAccount] {
        &self.identity.accounts
    }

    /// Looks up a merchant account of the session.
    #[inline]
    #[must_use]
    pub fn merchant(&self, merchant_id: &MerchantId) -> Option<&'rec MerchantAccount> {
        let found = self
            .accounts()
            .iter()
            .find(|account| account.merchant_id == *merchant_id);
        if found.is_none() {
            tracing::debug!(merchant_id = %merchant_id, "merchant not found");
        }
        found
    }

    /// Looks up a terminal under one of the session's merchants.
    #[inline]
    #[must_use]
    pub fn terminal(
        &self,
        merchant_id: &MerchantId,
        terminal_id: &TerminalId,
    ) -> Option<&'rec TerminalRecord> {
        self.merchant(merchant_id)
            .and_then(|account| account.terminal(terminal_id))
    }

    /// Looks up a transaction by ID.
    #[inline]
    #[must_use]
    pub fn transaction(&self, id: &TransactionId) -> Option<&'rec Transaction> {
        self.records.transaction(id)
    }

    /// Transactions matching `filter`, newest first.
    #[inline]
    #[must_use]
    pub fn transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        filter.apply(self.records.transactions())
    }

    /// The `limit` most recent transactions.
    #[inline]
    #[must_use]
    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        let mut recent = self.records.transactions().to_vec();
        sort_newest_first(&mut recent);
        recent.truncate(limit);
        recent
    }

    /// A merchant account with its transactions.
    #[inline]
    #[must_use]
    pub fn merchant_overview(&self, merchant_id: &MerchantId) -> Option<MerchantOverview<'rec>> {
        let account = self.merchant(merchant_id)?;
        let scope = FilterScope::merchant(merchant_id.clone());
        Some(MerchantOverview {
            account,
            transactions: self.transactions(&scope.default_filter()),
        })
    }

    /// A terminal with its transactions, successful volume and success
    /// rate.
    #[inline]
    #[must_use]
    pub fn terminal_overview(
        &self,
        merchant_id: &MerchantId,
        terminal_id: &TerminalId,
    ) -> Option<TerminalOverview<'rec>> {
        let account = self.merchant(merchant_id)?;
        let terminal = account.terminal(terminal_id)?;
        let scope = FilterScope::terminal(merchant_id.clone(), terminal_id.clone());
        let transactions = self.transactions(&scope.default_filter());
        let summary = Summary::from_transactions(&transactions);
        Some(TerminalOverview {
            account,
            terminal,
            transactions,
            success_volume: summary.total_sales,
            success_rate: summary
                .success_rate()
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        })
    }

    /// Headline figures: stored summary, account and terminal counts and
    /// the latest transactions.
    #[inline]
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        let accounts = self.accounts();
        let terminals = || accounts.iter().flat_map(|account| account.terminals.iter());
        Dashboard {
            merchant_name: self.identity.display_name.clone(),
            summary: *self.records.summary(),
            total_merchants: accounts.len(),
            active_merchants: accounts
                .iter()
                .filter(|account| account.status.is_active())
                .count(),
            total_terminals: terminals().count(),
            active_terminals: terminals()
                .filter(|terminal| terminal.status.is_active())
                .count(),
            recent: self.recent_transactions(PREVIEW_LIMIT),
        }
    }
}
