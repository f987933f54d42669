use crate::aggregate::daily_totals;
use crate::equity::equity_curve;
use crate::math::{mean, population_std_dev, safe_ratio};
use crate::report::{MetricsSnapshot, ProfitFactor};
use core_types::TradeRecord;
use rust_decimal::Decimal;

/// A stateless calculator deriving the full [`MetricsSnapshot`] from a record
/// set.
///
/// Win/loss statistics are computed from per-trade results, never from daily
/// sums, since a day can hold winning and losing trades that cancel. Only the
/// Sharpe-style ratio and drawdown read the daily series.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every scalar metric for the given record set.
    ///
    /// Empty input produces the zeroed default snapshot; degenerate ratios
    /// resolve to their documented fallbacks instead of erroring.
    pub fn metrics(&self, records: &[TradeRecord]) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::default();
        if records.is_empty() {
            return snapshot;
        }

        self.tally_trades(records, &mut snapshot);
        self.derive_distribution(&mut snapshot);
        self.derive_series_metrics(records, &mut snapshot);
        snapshot.current_streak = current_streak(records);

        snapshot
    }

    /// Single pass over the per-trade results: counts, gross sums, extremes.
    fn tally_trades(&self, records: &[TradeRecord], snapshot: &mut MetricsSnapshot) {
        snapshot.total_trades = records.len();
        snapshot.best_trade = records[0].result;
        snapshot.worst_trade = records[0].result;

        for record in records {
            snapshot.total_net_result += record.result;
            snapshot.best_trade = snapshot.best_trade.max(record.result);
            snapshot.worst_trade = snapshot.worst_trade.min(record.result);

            // Zero-result trades count toward the total only; they dilute
            // both rates through the denominator.
            if record.result > Decimal::ZERO {
                snapshot.winning_trades += 1;
                snapshot.gross_profit += record.result;
            } else if record.result < Decimal::ZERO {
                snapshot.losing_trades += 1;
                snapshot.gross_loss += record.result.abs();
            }
        }
    }

    /// Ratios built on the tallies: profit factor, win rate, averages,
    /// expectancy.
    fn derive_distribution(&self, snapshot: &mut MetricsSnapshot) {
        snapshot.profit_factor = if snapshot.gross_loss > Decimal::ZERO {
            ProfitFactor::Finite(safe_ratio(snapshot.gross_profit, snapshot.gross_loss))
        } else if snapshot.gross_profit > Decimal::ZERO {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Finite(Decimal::ZERO)
        };

        let total = Decimal::from(snapshot.total_trades);
        let win_rate = safe_ratio(Decimal::from(snapshot.winning_trades), total);
        let loss_rate = safe_ratio(Decimal::from(snapshot.losing_trades), total);

        snapshot.win_rate_pct = win_rate * Decimal::ONE_HUNDRED;
        snapshot.average_win = safe_ratio(
            snapshot.gross_profit,
            Decimal::from(snapshot.winning_trades),
        );
        snapshot.average_loss =
            safe_ratio(snapshot.gross_loss, Decimal::from(snapshot.losing_trades));
        snapshot.expectancy =
            win_rate * snapshot.average_win - loss_rate * snapshot.average_loss;
    }

    /// Metrics that read the ordered daily series: Sharpe-style ratio,
    /// max drawdown, recovery factor.
    fn derive_series_metrics(&self, records: &[TradeRecord], snapshot: &mut MetricsSnapshot) {
        let daily = daily_totals(records);
        let daily_results: Vec<Decimal> = daily.iter().map(|b| b.result).collect();

        // Population standard deviation (divide by n): the record set is the
        // whole sample, not a draw from one.
        snapshot.sharpe_ratio =
            safe_ratio(mean(&daily_results), population_std_dev(&daily_results));

        snapshot.max_drawdown = equity_curve(&daily).max_drawdown;
        snapshot.recovery_factor = safe_ratio(snapshot.total_net_result, snapshot.max_drawdown);
    }
}

/// The trailing run of same-signed trade results, scanned in chronological
/// order (ties at identical date+time keep input order).
///
/// Positive count for consecutive wins, negative for consecutive losses; a
/// zero-result trade breaks any streak to `0`.
pub fn current_streak(records: &[TradeRecord]) -> i64 {
    let mut ordered: Vec<&TradeRecord> = records.iter().collect();
    ordered.sort_by_key(|r| (r.date, r.time));

    let Some(last) = ordered.last() else {
        return 0;
    };
    if last.result.is_zero() {
        return 0;
    }

    let winning = last.result > Decimal::ZERO;
    let mut streak: i64 = 0;
    for record in ordered.iter().rev() {
        let same_sign = if winning {
            record.result > Decimal::ZERO
        } else {
            record.result < Decimal::ZERO
        };
        if !same_sign {
            break;
        }
        streak += 1;
    }

    if winning { streak } else { -streak }
}
