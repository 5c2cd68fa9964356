//! Transaction model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MerchantId, TerminalId, TransactionId, TransactionStatus, TransactionType};

/// A single payment event on one MID/TID pair.
///
/// `merchant_id` and `terminal_id` are weak references: nothing guarantees
/// that the pair resolves to an account of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Merchant the payment was taken on.
    #[serde(rename = "mid")]
    pub merchant_id: MerchantId,
    /// Terminal the payment was taken on.
    #[serde(rename = "tid")]
    pub terminal_id: TerminalId,
    /// Amount with two-digit scale (stored as a JSON string, e.g. `"250.00"`).
    pub amount: Decimal,
    /// ISO-4217 currency code.
    pub currency: String,
    /// Payment outcome.
    pub status: TransactionStatus,
    /// ISO-8601 instant, kept verbatim; see [`Transaction::occurred_at`].
    pub timestamp: String,
    /// Operation kind, when the record carries one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    /// Payment method label (`Credit Card`, `Apple Pay`, ...).
    pub payment_method: String,
    /// Card scheme or product (`Visa`, `Mastercard`, ...).
    pub card_type: String,
    /// Last four digits of the card number.
    pub card_last4: String,
    /// Authorization code for approved payments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    /// Decline reason for failed payments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Free-form extra details (terminal location, references, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<BTreeMap<String, String>>,
}

impl Transaction {
    /// Parses [`Transaction::timestamp`].
    ///
    /// Returns `None` for malformed timestamps instead of failing; callers
    /// decide how such records are treated.
    #[inline]
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.timestamp.trim())
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Looks up an additional-info entry. Missing maps and keys are both
    /// reported as `None`.
    #[inline]
    #[must_use]
    pub fn info(&self, key: &str) -> Option<&str> {
        self.additional_info
            .as_ref()
            .and_then(|info| info.get(key))
            .map(String::as_str)
    }

    /// Returns `true` when the payment succeeded.
    #[inline]
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}
