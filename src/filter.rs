//! Transaction filtering and record search.
//!
//! [`TransactionFilter`] composes independent criteria; a transaction must
//! satisfy every set criterion to pass. Results are always ordered newest
//! first with a stable sort.

use core::cmp::Reverse;
use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::models::{
    MerchantAccount, MerchantId, TerminalId, TerminalRecord, Transaction, TransactionStatus,
    TransactionType,
};

/// Calendar-day range over transaction timestamps (UTC).
///
/// Both bounds are inclusive; the end bound covers the whole day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    #[inline]
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Open-ended range starting at `start`.
    #[inline]
    #[must_use]
    pub const fn since(start: NaiveDate) -> Self {
        Self::new(Some(start), None)
    }

    /// Range covering exactly one day.
    #[inline]
    #[must_use]
    pub const fn on(day: NaiveDate) -> Self {
        Self::new(Some(day), Some(day))
    }

    /// Returns `true` when neither bound is set.
    #[inline]
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns `true` if the instant falls inside the range.
    #[inline]
    #[must_use]
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }
}

/// Relative date windows offered by the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePreset {
    /// From the start of today.
    Today,
    /// The whole of yesterday.
    Yesterday,
    /// From the start of the day seven days ago.
    Last7Days,
    /// From the start of the day thirty days ago.
    Last30Days,
}

impl DatePreset {
    /// All presets, in display order.
    pub const ALL: [Self; 4] = [Self::Today, Self::Yesterday, Self::Last7Days, Self::Last30Days];

    /// Resolves the preset against the given current day.
    #[inline]
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let days_back = |days: u64| {
            today
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN)
        };
        match self {
            Self::Today => DateRange::since(today),
            Self::Yesterday => DateRange::on(days_back(1)),
            Self::Last7Days => DateRange::since(days_back(7)),
            Self::Last30Days => DateRange::since(days_back(30)),
        }
    }

    /// Returns the preset's name as accepted by [`FromStr`].
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7Days => "last7days",
            Self::Last30Days => "last30days",
        }
    }
}

impl fmt::Display for DatePreset {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = ParsePresetError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePresetError(s.to_owned()))
    }
}

/// Returned when a string does not name a [`DatePreset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date preset `{0}` (expected today, yesterday, last7days or last30days)")]
pub struct ParsePresetError(String);

/// Composable filter over transactions.
///
/// Use builder-style methods to chain criteria. Unset criteria impose no
/// constraint.
///
/// # Examples
///
/// ```
/// use merchant_portal::filter::TransactionFilter;
/// use merchant_portal::models::{MerchantId, TransactionStatus};
///
/// let filter = TransactionFilter::new()
///     .merchant(MerchantId::from("MID001"))
///     .status(TransactionStatus::Failed)
///     .search("visa");
/// assert!(filter.search.is_some());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Merchant ID (exact match).
    pub merchant: Option<MerchantId>,
    /// Terminal ID (exact match).
    pub terminal: Option<TerminalId>,
    /// Payment status (exact match).
    pub status: Option<TransactionStatus>,
    /// Timestamp window; transactions with unparseable timestamps never
    /// match an active range.
    pub date_range: Option<DateRange>,
    /// Case-insensitive substring over the searchable fields.
    pub search: Option<String>,
}

impl TransactionFilter {
    /// Creates an empty filter that matches all transactions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to transactions taken on the given merchant.
    #[inline]
    #[must_use]
    pub fn merchant(mut self, id: MerchantId) -> Self {
        self.merchant = Some(id);
        self
    }

    /// Restricts to transactions taken on the given terminal.
    #[inline]
    #[must_use]
    pub fn terminal(mut self, id: TerminalId) -> Self {
        self.terminal = Some(id);
        self
    }

    /// Restricts to transactions with the given status.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to transactions inside the given date range. An
    /// unbounded range clears the constraint.
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = if range.is_unbounded() {
            None
        } else {
            Some(range)
        };
        self
    }

    /// Restricts to a preset window relative to `today`.
    #[inline]
    #[must_use]
    pub fn preset(self, preset: DatePreset, today: NaiveDate) -> Self {
        self.date_range(preset.resolve(today))
    }

    /// Restricts to transactions whose merchant ID, terminal ID, amount,
    /// status, type, card type or card last-4 contains `text`
    /// (case-insensitive). The text is matched as given, surrounding
    /// whitespace included; blank text clears the constraint.
    #[inline]
    #[must_use]
    pub fn search<T: AsRef<str>>(mut self, text: T) -> Self {
        let query = text.as_ref();
        self.search = (!query.trim().is_empty()).then(|| query.to_owned());
        self
    }

    /// Replaces this filter with the default view of `scope`, dropping
    /// every criterion the scope does not pin.
    #[inline]
    pub fn reset(&mut self, scope: &FilterScope) {
        *self = scope.default_filter();
    }

    /// Returns the matching transactions, newest first.
    ///
    /// The sort is stable: transactions with equal timestamps keep their
    /// input order. Unparseable timestamps sort last.
    #[inline]
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        matched
    }

    /// Returns `true` if the transaction satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_merchant(tx)
            && self.matches_terminal(tx)
            && self.matches_status(tx)
            && self.matches_date(tx)
            && self.matches_search(tx)
    }

    /// Checks merchant criteria.
    fn matches_merchant(&self, tx: &Transaction) -> bool {
        self.merchant.as_ref().is_none_or(|mid| tx.merchant_id == *mid)
    }

    /// Checks terminal criteria.
    fn matches_terminal(&self, tx: &Transaction) -> bool {
        self.terminal.as_ref().is_none_or(|tid| tx.terminal_id == *tid)
    }

    /// Checks status criteria.
    fn matches_status(&self, tx: &Transaction) -> bool {
        self.status.is_none_or(|status| tx.status == status)
    }

    /// Checks date range criteria.
    fn matches_date(&self, tx: &Transaction) -> bool {
        self.date_range.as_ref().is_none_or(|range| {
            tx.occurred_at()
                .is_some_and(|instant| range.contains(&instant))
        })
    }

    /// Checks search criteria.
    fn matches_search(&self, tx: &Transaction) -> bool {
        self.search.as_deref().is_none_or(|text| {
            let needle = text.to_lowercase();
            let amount = tx.amount.to_string();
            [
                Some(tx.merchant_id.as_inner()),
                Some(tx.terminal_id.as_inner()),
                Some(amount.as_str()),
                Some(tx.status.as_str()),
                tx.kind.map(TransactionType::as_str),
                Some(tx.card_type.as_str()),
                Some(tx.card_last4.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| contains_ignore_case(field, &needle))
        })
    }
}

/// Route-level scope of a transaction list (e.g. opened from a MID or TID
/// detail view).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterScope {
    /// Merchant the view was opened for.
    pub merchant: Option<MerchantId>,
    /// Terminal the view was opened for.
    pub terminal: Option<TerminalId>,
}

impl FilterScope {
    /// Scope of the unrestricted transaction list.
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope of a merchant's transactions.
    #[inline]
    #[must_use]
    pub const fn merchant(merchant: MerchantId) -> Self {
        Self {
            merchant: Some(merchant),
            terminal: None,
        }
    }

    /// Scope of one terminal's transactions.
    #[inline]
    #[must_use]
    pub const fn terminal(merchant: MerchantId, terminal: TerminalId) -> Self {
        Self {
            merchant: Some(merchant),
            terminal: Some(terminal),
        }
    }

    /// Filter shown when the view opens or is reset.
    #[inline]
    #[must_use]
    pub fn default_filter(&self) -> TransactionFilter {
        TransactionFilter {
            merchant: self.merchant.clone(),
            terminal: self.terminal.clone(),
            ..TransactionFilter::default()
        }
    }
}

/// Sorts transactions newest first, keeping the input order of ties.
#[inline]
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|tx| Reverse(tx.occurred_at()));
}

/// MIDs selectable in the transaction filter, in account order.
#[inline]
#[must_use]
pub fn merchant_options(accounts: &[MerchantAccount]) -> Vec<MerchantId> {
    accounts
        .iter()
        .map(|account| account.merchant_id.clone())
        .collect()
}

/// TIDs selectable in the transaction filter.
///
/// With a selected MID, only that merchant's terminals are offered (none
/// if the MID is unknown); otherwise every terminal of every account.
#[inline]
#[must_use]
pub fn terminal_options(
    accounts: &[MerchantAccount],
    selected: Option<&MerchantId>,
) -> Vec<TerminalId> {
    accounts
        .iter()
        .filter(|account| selected.is_none_or(|mid| account.merchant_id == *mid))
        .flat_map(|account| account.terminals.iter())
        .map(|terminal| terminal.terminal_id.clone())
        .collect()
}

/// Accounts whose MID or payment channel contains `text`
/// (case-insensitive). Blank text returns every account.
#[inline]
#[must_use]
pub fn search_merchants<'rec>(
    accounts: &'rec [MerchantAccount],
    text: &str,
) -> Vec<&'rec MerchantAccount> {
    let needle = text.trim().to_lowercase();
    accounts
        .iter()
        .filter(|account| {
            contains_ignore_case(account.merchant_id.as_inner(), &needle)
                || contains_ignore_case(&account.payment_channel, &needle)
        })
        .collect()
}

/// Terminals whose TID contains `text` (case-insensitive). Blank text
/// returns every terminal.
#[inline]
#[must_use]
pub fn search_terminals<'rec>(
    terminals: &'rec [TerminalRecord],
    text: &str,
) -> Vec<&'rec TerminalRecord> {
    let needle = text.trim().to_lowercase();
    terminals
        .iter()
        .filter(|terminal| contains_ignore_case(terminal.terminal_id.as_inner(), &needle))
        .collect()
}

/// Substring test against an already-lowercased needle.
fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
