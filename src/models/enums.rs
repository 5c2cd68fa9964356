//! Enumeration types for constrained record values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a merchant account or terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountStatus {
    /// Accepting transactions.
    Active,
    /// Disabled.
    Inactive,
}

impl AccountStatus {
    /// Returns `true` for [`AccountStatus::Active`].
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns the wire representation (`active` / `inactive`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AccountStatus {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Authorized and settled.
    Success,
    /// Declined or errored.
    Failed,
    /// Not yet resolved.
    Pending,
}

impl TransactionStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 3] = [Self::Success, Self::Failed, Self::Pending];

    /// Returns the wire representation (`Success`, `Failed`, `Pending`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for TransactionStatus {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseStatusError;

    /// Parses a status name, ignoring ASCII case.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}

/// Returned when a string does not name a [`TransactionStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction status `{0}` (expected Success, Failed or Pending)")]
pub struct ParseStatusError(String);

/// Kind of payment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Regular sale.
    Purchase,
    /// Money returned to the cardholder.
    Refund,
    /// Pre-authorization hold.
    Auth,
    /// Cancelled before settlement.
    Void,
}

impl TransactionType {
    /// Returns the wire representation.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Refund => "Refund",
            Self::Auth => "Auth",
            Self::Void => "Void",
        }
    }
}

impl fmt::Display for TransactionType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_status_serde_lowercase() {
        let json = serde_json::to_string(&AccountStatus::Inactive).unwrap();
        assert_eq!(json, r#""inactive""#);
        let deserialized: AccountStatus = serde_json::from_str(r#""active""#).unwrap();
        assert_eq!(deserialized, AccountStatus::Active);
        assert!(deserialized.is_active());
    }

    #[test]
    fn transaction_status_serde_pascal_case() {
        for status in TransactionStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn transaction_status_parses_case_insensitively() {
        assert_eq!(
            "failed".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Failed)
        );
        assert_eq!(
            " PENDING ".parse::<TransactionStatus>(),
            Ok(TransactionStatus::Pending)
        );
    }

    #[test]
    fn transaction_status_rejects_unknown() {
        let err = "refunded".parse::<TransactionStatus>().unwrap_err();
        assert!(err.to_string().contains("refunded"));
    }

    #[test]
    fn transaction_type_deserializes() {
        let kind: TransactionType = serde_json::from_str(r#""Refund""#).unwrap();
        assert_eq!(kind, TransactionType::Refund);
        assert_eq!(kind.to_string(), "Refund");
    }
}
