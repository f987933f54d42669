//! Daily aggregation: the pure fold every time-series view is built on.

use chrono::NaiveDate;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// The sum of trade results for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub result: Decimal,
}

/// Groups records by an arbitrary projected key, summing `result` per bucket.
///
/// The accumulator is a `BTreeMap`, which gives the two guarantees the rest
/// of the engine relies on: entries emit sorted by the natural order of the
/// key, and identical keys merge by addition rather than last-write-wins.
/// Empty input yields an empty list.
pub fn aggregate_by<K, F>(records: &[TradeRecord], key_fn: F) -> Vec<(K, Decimal)>
where
    K: Ord,
    F: Fn(&TradeRecord) -> K,
{
    let mut buckets: BTreeMap<K, Decimal> = BTreeMap::new();
    for record in records {
        *buckets.entry(key_fn(record)).or_insert(Decimal::ZERO) += record.result;
    }
    buckets.into_iter().collect()
}

/// Whole-portfolio daily totals, in chronological order.
pub fn daily_totals(records: &[TradeRecord]) -> Vec<DailyBucket> {
    aggregate_by(records, |r| r.date)
        .into_iter()
        .map(|(date, result)| DailyBucket { date, result })
        .collect()
}

/// Daily totals keyed by `(date, strategy)`, chronological then lexicographic.
pub fn daily_totals_by_strategy(records: &[TradeRecord]) -> Vec<((NaiveDate, String), Decimal)> {
    aggregate_by(records, |r| (r.date, r.strategy.clone()))
}

/// Daily totals keyed by `(date, hour-of-day)`.
pub fn daily_totals_by_hour(records: &[TradeRecord]) -> Vec<((NaiveDate, u32), Decimal)> {
    aggregate_by(records, |r| (r.date, r.hour()))
}
