use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the analytics workspace.
///
/// Every product-tuned constant the engine and the alert evaluator consume
/// lives here, so a deployment can retune thresholds without touching code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsParams,
    #[serde(default)]
    pub risk: RiskThresholds,
}

/// Parameters for the pure computation side of the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsParams {
    /// Notional starting capital for the monthly percent-return table.
    pub starting_capital: Decimal,
    /// First hour-of-day included in the hourly breakdown (inclusive).
    pub session_start_hour: u32,
    /// Last hour-of-day included in the hourly breakdown (inclusive).
    pub session_end_hour: u32,
    /// Inflation applied to the mean losing result when recommending a
    /// per-hour stop size.
    pub stop_safety_multiplier: Decimal,
}

/// Thresholds for the risk alert rules.
///
/// Boundary semantics are as written in the field docs; all comparisons are
/// made against these values, never against literals in the evaluator.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskThresholds {
    /// Trailing window, in calendar days, for the percent-drawdown rules.
    pub drawdown_window_days: i64,
    /// Percent drawdown strictly above this is a high-severity alert.
    pub drawdown_high_pct: Decimal,
    /// Percent drawdown at or above this (and not high) is medium severity.
    pub drawdown_medium_pct: Decimal,
    /// Consecutive losing trades at or above this count are high severity.
    pub loss_streak_high: usize,
    /// Consecutive losing trades at or above this count (and not high) are
    /// medium severity.
    pub loss_streak_medium: usize,
    /// Strategies with fewer trades than this are never evaluated.
    pub min_trades_per_strategy: usize,
    /// Win rate strictly below this flags a strategy as underperforming.
    pub underperform_win_rate_pct: Decimal,
    /// Win rate strictly above this (with a positive total) flags a strategy
    /// as performing well.
    pub outperform_win_rate_pct: Decimal,
}

// --- Default Implementations ---
// These allow a user to omit sections (or the whole config.toml) and still
// get the product-tuned values.

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            starting_capital: dec!(10000),
            session_start_hour: 9,
            session_end_hour: 18,
            stop_safety_multiplier: dec!(1.4),
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            drawdown_window_days: 30,
            drawdown_high_pct: dec!(8),
            drawdown_medium_pct: dec!(5),
            loss_streak_high: 5,
            loss_streak_medium: 3,
            min_trades_per_strategy: 10,
            underperform_win_rate_pct: dec!(40),
            outperform_win_rate_pct: dec!(70),
        }
    }
}

impl AnalyticsParams {
    /// Validates that the session window is a usable hour range.
    pub fn validate(&self) -> Result<(), String> {
        if self.session_start_hour > 23 || self.session_end_hour > 23 {
            return Err("session hours must be in 0..=23".to_string());
        }
        if self.session_start_hour > self.session_end_hour {
            return Err("session_start_hour must not exceed session_end_hour".to_string());
        }
        if self.stop_safety_multiplier <= Decimal::ZERO {
            return Err("stop_safety_multiplier must be greater than 0".to_string());
        }
        Ok(())
    }
}
