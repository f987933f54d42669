//! Helpers shared by the unit tests in this crate.

use chrono::NaiveTime;
use core_types::TradeRecord;
use rust_decimal::Decimal;

/// Builds a one-contract, zero-cost record for the given day, time-of-day,
/// strategy and result.
pub(crate) fn record(date: &str, time: &str, strategy: &str, result: Decimal) -> TradeRecord {
    TradeRecord {
        date: date.parse().unwrap(),
        time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
        asset: "WIN".to_string(),
        strategy: strategy.to_string(),
        contracts: 1,
        costs: Decimal::ZERO,
        result,
    }
}
