//! Equity curve and drawdown computation.

use crate::aggregate::DailyBucket;
use crate::math::safe_ratio;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One point on the cumulative equity curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub daily_result: Decimal,
    pub cumulative: Decimal,
}

/// The full equity walk over an ordered daily series.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EquityCurve {
    pub points: Vec<EquityPoint>,
    /// Largest peak-to-trough distance observed, in currency. Always `>= 0`.
    pub max_drawdown: Decimal,
    /// The max drawdown expressed against the high-water mark it fell from,
    /// 0-100 scaled. `None` when that peak is `0` (an all-negative series):
    /// there is no percent drawdown to report, which is not the same as `0%`.
    pub max_drawdown_pct: Option<Decimal>,
}

/// Walks the chronologically ordered whole-portfolio daily series.
///
/// The high-water mark starts at `0`, the implicit pre-series equity, so an
/// all-negative series still measures its drawdown from zero rather than
/// from an assumed positive baseline.
pub fn equity_curve(daily: &[DailyBucket]) -> EquityCurve {
    let mut curve = EquityCurve::default();
    let mut accumulated = Decimal::ZERO;
    let mut peak = Decimal::ZERO;

    for bucket in daily {
        accumulated += bucket.result;
        if accumulated > peak {
            peak = accumulated;
        }
        let drawdown = peak - accumulated;
        if drawdown > curve.max_drawdown {
            curve.max_drawdown = drawdown;
            curve.max_drawdown_pct = if peak.is_zero() {
                None
            } else {
                Some(safe_ratio(drawdown, peak.abs()) * Decimal::ONE_HUNDRED)
            };
        }
        curve.points.push(EquityPoint {
            date: bucket.date,
            daily_result: bucket.result,
            cumulative: accumulated,
        });
    }

    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::daily_totals;
    use crate::test_util::record;
    use rust_decimal_macros::dec;

    fn curve_for(results: &[Decimal]) -> EquityCurve {
        let buckets: Vec<DailyBucket> = results
            .iter()
            .enumerate()
            .map(|(i, r)| DailyBucket {
                date: NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
                result: *r,
            })
            .collect();
        equity_curve(&buckets)
    }

    #[test]
    fn worked_example_from_three_days() {
        // +100, -40, +60: equity 100 / 60 / 120, peak fixed at 100, dd 40.
        let curve = curve_for(&[dec!(100), dec!(-40), dec!(60)]);
        let cumulative: Vec<Decimal> = curve.points.iter().map(|p| p.cumulative).collect();
        assert_eq!(cumulative, vec![dec!(100), dec!(60), dec!(120)]);
        assert_eq!(curve.max_drawdown, dec!(40));
        assert_eq!(curve.max_drawdown_pct, Some(dec!(40)));
    }

    #[test]
    fn final_cumulative_equals_series_sum() {
        let records = vec![
            record("2024-01-02", "10:00:00", "A", dec!(35.5)),
            record("2024-01-02", "11:00:00", "A", dec!(-12)),
            record("2024-01-05", "10:00:00", "B", dec!(80)),
        ];
        let curve = equity_curve(&daily_totals(&records));
        let total: Decimal = records.iter().map(|r| r.result).sum();
        assert_eq!(curve.points.last().unwrap().cumulative, total);
    }

    #[test]
    fn non_decreasing_series_has_zero_drawdown() {
        let curve = curve_for(&[dec!(10), dec!(0), dec!(25)]);
        assert_eq!(curve.max_drawdown, Decimal::ZERO);
        assert_eq!(curve.max_drawdown_pct, None);
    }

    #[test]
    fn all_negative_series_measures_from_the_zero_high_water_mark() {
        let curve = curve_for(&[dec!(-30), dec!(-20), dec!(-10)]);
        assert_eq!(curve.max_drawdown, dec!(60));
        // Peak never left zero, so there is no percent drawdown to report.
        assert_eq!(curve.max_drawdown_pct, None);
    }

    #[test]
    fn empty_series_yields_empty_curve() {
        let curve = equity_curve(&[]);
        assert!(curve.points.is_empty());
        assert_eq!(curve.max_drawdown, Decimal::ZERO);
        assert_eq!(curve.max_drawdown_pct, None);
    }
}
