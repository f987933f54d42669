use crate::RiskError;
use analytics::{current_streak, daily_totals, equity_curve};
use chrono::Duration;
use configuration::RiskThresholds;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// How urgent an advisory alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// An advisory produced by one threshold rule.
///
/// Ephemeral by design: recomputed on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAlert {
    /// Stable rule identifier (suffixed with the strategy for per-strategy
    /// rules), so the presentation layer can dedupe or route alerts.
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Stateless application of the threshold rules over the record set.
///
/// The rules are independent and additive: any subset may fire, and since
/// each reads only immutable snapshots of the same input, evaluation order
/// does not matter.
#[derive(Debug, Clone)]
pub struct RiskAlertEvaluator {
    thresholds: RiskThresholds,
}

impl RiskAlertEvaluator {
    /// Creates an evaluator, validating that the tiered thresholds are
    /// ordered sensibly.
    pub fn new(thresholds: RiskThresholds) -> Result<Self, RiskError> {
        if thresholds.drawdown_medium_pct > thresholds.drawdown_high_pct {
            return Err(RiskError::InvalidThresholds(
                "drawdown_medium_pct must not exceed drawdown_high_pct".to_string(),
            ));
        }
        if thresholds.loss_streak_medium > thresholds.loss_streak_high {
            return Err(RiskError::InvalidThresholds(
                "loss_streak_medium must not exceed loss_streak_high".to_string(),
            ));
        }
        if thresholds.underperform_win_rate_pct > thresholds.outperform_win_rate_pct {
            return Err(RiskError::InvalidThresholds(
                "underperform_win_rate_pct must not exceed outperform_win_rate_pct".to_string(),
            ));
        }
        Ok(Self { thresholds })
    }

    /// Runs every rule over the record set.
    pub fn evaluate(&self, records: &[TradeRecord]) -> Vec<RiskAlert> {
        let mut alerts = Vec::new();
        if records.is_empty() {
            return alerts;
        }

        self.drawdown_rule(records, &mut alerts);
        self.loss_streak_rule(records, &mut alerts);
        self.per_strategy_rules(records, &mut alerts);

        tracing::debug!(alerts = alerts.len(), "risk alert evaluation finished");
        alerts
    }

    /// Percent drawdown over the trailing window, measured against the
    /// high-water mark inside that window.
    ///
    /// The window is anchored at the most recent record date; the engine is
    /// a pure function of its input and has no clock. When the windowed peak
    /// never left zero there is no percent drawdown to report and the rule
    /// stays silent.
    fn drawdown_rule(&self, records: &[TradeRecord], alerts: &mut Vec<RiskAlert>) {
        let Some(anchor) = records.iter().map(|r| r.date).max() else {
            return;
        };
        let window_start = anchor - Duration::days(self.thresholds.drawdown_window_days);

        let windowed: Vec<TradeRecord> = records
            .iter()
            .filter(|r| r.date > window_start)
            .cloned()
            .collect();

        let curve = equity_curve(&daily_totals(&windowed));
        let Some(pct) = curve.max_drawdown_pct else {
            return;
        };

        let severity = if pct > self.thresholds.drawdown_high_pct {
            Severity::High
        } else if pct >= self.thresholds.drawdown_medium_pct {
            Severity::Medium
        } else {
            return;
        };

        alerts.push(RiskAlert {
            id: "drawdown-window".to_string(),
            severity,
            title: "Elevated drawdown".to_string(),
            message: format!(
                "Drawdown of {:.1}% over the last {} days",
                pct, self.thresholds.drawdown_window_days
            ),
        });
    }

    /// Trailing run of consecutive losing trades.
    fn loss_streak_rule(&self, records: &[TradeRecord], alerts: &mut Vec<RiskAlert>) {
        let streak = current_streak(records);
        if streak >= 0 {
            return;
        }
        let losses = streak.unsigned_abs() as usize;

        let severity = if losses >= self.thresholds.loss_streak_high {
            Severity::High
        } else if losses >= self.thresholds.loss_streak_medium {
            Severity::Medium
        } else {
            return;
        };

        alerts.push(RiskAlert {
            id: "loss-streak".to_string(),
            severity,
            title: "Consecutive losses".to_string(),
            message: format!("{losses} losing trades in a row"),
        });
    }

    /// Win-rate rules per strategy, evaluated only once a strategy has a
    /// statistically meaningful number of trades.
    fn per_strategy_rules(&self, records: &[TradeRecord], alerts: &mut Vec<RiskAlert>) {
        #[derive(Default)]
        struct Tally {
            trades: usize,
            wins: usize,
            total: Decimal,
        }

        let mut by_strategy: BTreeMap<&str, Tally> = BTreeMap::new();
        for record in records {
            let tally = by_strategy.entry(record.strategy.as_str()).or_default();
            tally.trades += 1;
            tally.total += record.result;
            if record.result > Decimal::ZERO {
                tally.wins += 1;
            }
        }

        for (strategy, tally) in by_strategy {
            if tally.trades < self.thresholds.min_trades_per_strategy {
                continue;
            }

            let win_rate_pct = Decimal::from(tally.wins) / Decimal::from(tally.trades)
                * Decimal::ONE_HUNDRED;

            if win_rate_pct < self.thresholds.underperform_win_rate_pct {
                alerts.push(RiskAlert {
                    id: format!("strategy-underperforming:{strategy}"),
                    severity: Severity::High,
                    title: format!("Strategy underperforming: {strategy}"),
                    message: format!(
                        "Win rate of {:.1}% over {} trades",
                        win_rate_pct, tally.trades
                    ),
                });
            } else if win_rate_pct > self.thresholds.outperform_win_rate_pct
                && tally.total > Decimal::ZERO
            {
                alerts.push(RiskAlert {
                    id: format!("strategy-performing:{strategy}"),
                    severity: Severity::Low,
                    title: format!("Strategy performing well: {strategy}"),
                    message: format!(
                        "Win rate of {:.1}% over {} trades with a positive total",
                        win_rate_pct, tally.trades
                    ),
                });
            }
        }
    }
}
