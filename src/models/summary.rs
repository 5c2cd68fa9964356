//! Aggregate counters shipped alongside the record set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Transaction, TransactionStatus};

/// Headline figures for the dashboard.
///
/// These are stored values, not derived ones: the record set is expected
/// to keep them in step with its transactions. Use
/// [`Summary::from_transactions`] to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of successful payment amounts.
    pub total_sales: Decimal,
    /// Number of transactions.
    pub total_transactions: u64,
    /// Number of successful transactions.
    pub successful_transactions: u64,
    /// Number of failed transactions.
    pub failed_transactions: u64,
}

impl Summary {
    /// Recomputes the counters from a transaction list.
    ///
    /// `total_sales` saturates at the [`Decimal`] bounds instead of
    /// overflowing.
    #[inline]
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Self::default(), |mut summary, tx| {
                summary.total_transactions += 1;
                match tx.status {
                    TransactionStatus::Success => {
                        summary.successful_transactions += 1;
                        summary.total_sales = summary.total_sales.saturating_add(tx.amount);
                    }
                    TransactionStatus::Failed => summary.failed_transactions += 1,
                    TransactionStatus::Pending => {}
                }
                summary
            })
    }

    /// Share of successful transactions in percent, `0` when empty.
    #[inline]
    #[must_use]
    pub fn success_rate(&self) -> Decimal {
        if self.total_transactions == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.successful_transactions) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total_transactions)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::records::RecordStore;

    #[test]
    fn deserialize_numeric_total_sales() {
        let json = r#"{
            "totalSales": 991.80,
            "totalTransactions": 7,
            "successfulTransactions": 5,
            "failedTransactions": 2
        }"#;
        let summary: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_sales, dec!(991.80));
        assert_eq!(summary.total_transactions, 7);
        assert_eq!(summary.successful_transactions, 5);
        assert_eq!(summary.failed_transactions, 2);
    }

    #[test]
    fn success_rate_of_empty_summary_is_zero() {
        assert_eq!(Summary::default().success_rate(), Decimal::ZERO);
    }

    #[test]
    fn success_rate_percent() {
        let summary = Summary {
            total_sales: dec!(0),
            total_transactions: 4,
            successful_transactions: 3,
            failed_transactions: 1,
        };
        assert_eq!(summary.success_rate(), dec!(75));
    }

    fn success(amount: Decimal) -> Transaction {
        let mut tx = RecordStore::sample().unwrap().transactions()[0].clone();
        tx.status = TransactionStatus::Success;
        tx.amount = amount;
        tx
    }

    #[test]
    fn total_sales_saturates_instead_of_overflowing() {
        let txs = [success(Decimal::MAX), success(Decimal::MAX)];
        let summary = Summary::from_transactions(&txs);
        assert_eq!(summary.total_sales, Decimal::MAX);
        assert_eq!(summary.successful_transactions, 2);
    }

    #[test]
    fn total_sales_sums_successes_only() {
        let mut failed = success(dec!(40.00));
        failed.status = TransactionStatus::Failed;
        let txs = [success(dec!(250.00)), failed, success(dec!(10.50))];
        let summary = Summary::from_transactions(&txs);
        assert_eq!(summary.total_sales, dec!(260.50));
        assert_eq!(summary.failed_transactions, 1);
        assert_eq!(summary.total_transactions, 3);
    }

    #[test]
    fn from_transactions_of_nothing_is_default() {
        assert_eq!(Summary::from_transactions(&[]), Summary::default());
    }
}
