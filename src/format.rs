//! Display helpers for amounts and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Transaction;

/// Formats an amount with two decimals followed by its currency code,
/// e.g. `250.00 AED`.
#[inline]
#[must_use]
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let mut value = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    format!("{value} {currency}")
}

/// Formats a calendar date as `Jan 15, 2024`.
#[inline]
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a transaction's timestamp as `2025-04-01 12:30 UTC`, falling
/// back to the raw text when it cannot be parsed.
#[inline]
#[must_use]
pub fn format_timestamp(tx: &Transaction) -> String {
    tx.occurred_at().map_or_else(
        || tx.timestamp.clone(),
        |instant| instant.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::records::RecordStore;

    #[test]
    fn amount_pads_to_two_decimals() {
        assert_eq!(format_amount(dec!(250), "AED"), "250.00 AED");
        assert_eq!(format_amount(dec!(50.25), "AED"), "50.25 AED");
        assert_eq!(format_amount(dec!(0.005), "USD"), "0.01 USD");
    }

    #[test]
    fn date_uses_short_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
        let date = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        assert_eq!(format_date(date), "Nov 20, 2024");
    }

    #[test]
    fn timestamp_parsed_and_raw() {
        let records = RecordStore::sample().unwrap();
        let mut tx = records.transactions()[0].clone();
        assert_eq!(format_timestamp(&tx), "2025-04-01 12:30 UTC");
        tx.timestamp = "yesterday-ish".to_owned();
        assert_eq!(format_timestamp(&tx), "yesterday-ish");
    }
}
