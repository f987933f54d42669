//! Pairwise Pearson correlation between per-strategy daily return series.

use crate::aggregate::daily_totals_by_strategy;
use crate::error::AnalyticsError;
use crate::math::sqrt_or_zero;
use chrono::NaiveDate;
use core_types::{NO_STRATEGY, TradeRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A square, symmetric matrix of Pearson coefficients, indexed by the sorted
/// set of distinct strategy labels present in the record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub strategies: Vec<String>,
    /// `values[i][j]` is the coefficient between `strategies[i]` and
    /// `strategies[j]`. Diagonal is exactly `1`; `(i, j)` and `(j, i)` are
    /// the same stored value, so symmetry is bit-identical by construction.
    pub values: Vec<Vec<Decimal>>,
}

impl CorrelationMatrix {
    pub fn value(&self, i: usize, j: usize) -> Decimal {
        self.values[i][j]
    }
}

/// Builds the cross-strategy correlation matrix.
///
/// The "no strategy" sentinel bucket is not a strategy and takes no part
/// here. Fewer than two distinct labels is reported as `NotEnoughData`
/// rather than a degenerate 0x0 or 1x1 matrix.
///
/// Every labeled strategy's daily sums are aligned to the common date axis;
/// days a strategy did not trade contribute `0` to its series. The axis
/// itself is built from labeled trades only: a day on which only sentinel
/// trades occurred carries no strategy signal and would merely pad every
/// series with a shared zero, so it is excluded.
pub fn correlation_matrix(records: &[TradeRecord]) -> Result<CorrelationMatrix, AnalyticsError> {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut by_strategy: BTreeMap<String, BTreeMap<NaiveDate, Decimal>> = BTreeMap::new();

    for ((date, strategy), sum) in daily_totals_by_strategy(records) {
        if strategy == NO_STRATEGY {
            continue;
        }
        dates.insert(date);
        by_strategy.entry(strategy).or_default().insert(date, sum);
    }

    if by_strategy.len() < 2 {
        return Err(AnalyticsError::NotEnoughData(format!(
            "correlation needs at least 2 distinct strategies, found {}",
            by_strategy.len()
        )));
    }

    let strategies: Vec<String> = by_strategy.keys().map(|s| s.to_string()).collect();
    let series: Vec<Vec<Decimal>> = by_strategy
        .values()
        .map(|daily| {
            dates
                .iter()
                .map(|d| daily.get(d).copied().unwrap_or(Decimal::ZERO))
                .collect()
        })
        .collect();

    // Evaluate each unordered pair once and mirror it, so (i, j) and (j, i)
    // are bit-identical.
    let n = strategies.len();
    let mut values = vec![vec![Decimal::ZERO; n]; n];
    for i in 0..n {
        values[i][i] = Decimal::ONE;
        for j in (i + 1)..n {
            let coefficient = pearson(&series[i], &series[j]);
            values[i][j] = coefficient;
            values[j][i] = coefficient;
        }
    }

    Ok(CorrelationMatrix { strategies, values })
}

/// Pearson correlation coefficient of two equal-length series.
///
/// A zero-variance series correlates at `0` with anything by definition
/// here, never a divide-by-zero.
fn pearson(xs: &[Decimal], ys: &[Decimal]) -> Decimal {
    let n = Decimal::from(xs.len());
    if xs.len() < 2 {
        return Decimal::ZERO;
    }

    let sum_x: Decimal = xs.iter().copied().sum();
    let sum_y: Decimal = ys.iter().copied().sum();
    let sum_xy: Decimal = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();
    let sum_x2: Decimal = xs.iter().map(|x| x * x).sum();
    let sum_y2: Decimal = ys.iter().map(|y| y * y).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = sqrt_or_zero(n * sum_x2 - sum_x * sum_x) * sqrt_or_zero(n * sum_y2 - sum_y * sum_y);

    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::record;
    use rust_decimal_macros::dec;

    #[test]
    fn single_strategy_is_insufficient_data() {
        let records = vec![
            record("2024-01-02", "10:00:00", "Solo", dec!(10)),
            record("2024-01-03", "10:00:00", "Solo", dec!(20)),
            // Sentinel records do not count as a second strategy.
            record("2024-01-03", "11:00:00", NO_STRATEGY, dec!(5)),
        ];
        assert!(matches!(
            correlation_matrix(&records),
            Err(AnalyticsError::NotEnoughData(_))
        ));
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let records = vec![
            record("2024-01-02", "10:00:00", "A", dec!(10)),
            record("2024-01-03", "10:00:00", "A", dec!(-5)),
            record("2024-01-04", "10:00:00", "A", dec!(8)),
            record("2024-01-02", "11:00:00", "B", dec!(3)),
            record("2024-01-04", "11:00:00", "B", dec!(-1)),
            record("2024-01-02", "12:00:00", "C", dec!(7)),
            record("2024-01-03", "12:00:00", "C", dec!(7)),
        ];

        let matrix = correlation_matrix(&records).unwrap();
        assert_eq!(matrix.strategies, vec!["A", "B", "C"]);
        for i in 0..3 {
            assert_eq!(matrix.value(i, i), Decimal::ONE);
            for j in 0..3 {
                assert_eq!(matrix.value(i, j), matrix.value(j, i));
                assert!(matrix.value(i, j).abs() <= Decimal::ONE + dec!(0.000001));
            }
        }
    }

    #[test]
    fn identical_series_correlate_at_one() {
        let records = vec![
            record("2024-01-02", "10:00:00", "A", dec!(10)),
            record("2024-01-03", "10:00:00", "A", dec!(-4)),
            record("2024-01-02", "11:00:00", "B", dec!(10)),
            record("2024-01-03", "11:00:00", "B", dec!(-4)),
        ];

        let matrix = correlation_matrix(&records).unwrap();
        let delta = (matrix.value(0, 1) - Decimal::ONE).abs();
        assert!(delta < dec!(0.000001), "coefficient off by {delta}");
    }

    #[test]
    fn zero_variance_series_correlates_at_zero() {
        // B trades the same result every day: no variance.
        let records = vec![
            record("2024-01-02", "10:00:00", "A", dec!(10)),
            record("2024-01-03", "10:00:00", "A", dec!(-4)),
            record("2024-01-02", "11:00:00", "B", dec!(5)),
            record("2024-01-03", "11:00:00", "B", dec!(5)),
        ];

        let matrix = correlation_matrix(&records).unwrap();
        assert_eq!(matrix.value(0, 1), Decimal::ZERO);
    }

    #[test]
    fn missing_days_contribute_zero_to_the_common_axis() {
        // A perfectly anti-correlates with B once B's missing day is zero.
        let records = vec![
            record("2024-01-02", "10:00:00", "A", dec!(10)),
            record("2024-01-03", "10:00:00", "A", dec!(0)),
            record("2024-01-03", "11:00:00", "B", dec!(10)),
            record("2024-01-02", "11:00:00", "B", dec!(0)),
        ];

        let matrix = correlation_matrix(&records).unwrap();
        let delta = (matrix.value(0, 1) + Decimal::ONE).abs();
        assert!(delta < dec!(0.000001), "coefficient off by {delta}");
    }

    #[test]
    fn sentinel_only_days_are_not_part_of_the_date_axis() {
        // Two strategies sampled on two shared days correlate at exactly 1.
        // A third day with only sentinel trades must not pad both series
        // with a shared zero point, which would drag the coefficient down.
        let records = vec![
            record("2024-04-01", "10:00:00", "A", dec!(10)),
            record("2024-04-01", "10:30:00", "B", dec!(30)),
            record("2024-04-02", "10:00:00", "A", dec!(20)),
            record("2024-04-02", "10:30:00", "B", dec!(40)),
            record("2024-04-03", "10:00:00", NO_STRATEGY, dec!(500)),
        ];

        let matrix = correlation_matrix(&records).unwrap();
        assert_eq!(matrix.strategies, vec!["A", "B"]);
        let delta = (matrix.value(0, 1) - Decimal::ONE).abs();
        assert!(delta < dec!(0.000001), "coefficient off by {delta}");
    }
}
