use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit factor: total gains over total absolute losses.
///
/// Modeled as its own type because this metric genuinely has three regimes:
/// a finite ratio, "infinite" (winning trades and not a single losing one),
/// and zero (no gains either). Collapsing the infinite case into a sentinel
/// number would leak into every downstream comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ProfitFactor {
    Finite(Decimal),
    Infinite,
}

impl ProfitFactor {
    /// The finite value, if there is one. Presentation layers render
    /// `Infinite` as "∞".
    pub fn as_finite(&self) -> Option<Decimal> {
        match self {
            ProfitFactor::Finite(value) => Some(*value),
            ProfitFactor::Infinite => None,
        }
    }
}

impl Default for ProfitFactor {
    fn default() -> Self {
        ProfitFactor::Finite(Decimal::ZERO)
    }
}

/// An immutable aggregate of every scalar performance metric.
///
/// Fully determined by the record set it was computed from; it holds no
/// identity of its own and is rebuilt from scratch on every call. All
/// percentages are 0-100 scaled; all monetary values are raw Decimal in the
/// journal's implied currency; formatting is a presentation concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // I. Trade tallies
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,

    // II. Core profitability
    pub total_net_result: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub profit_factor: ProfitFactor,
    pub expectancy: Decimal,

    // III. Risk and drawdown
    /// Daily mean over daily population standard deviation; `0` when the
    /// series is flat or has a single point.
    pub sharpe_ratio: Decimal,
    pub max_drawdown: Decimal,
    /// Total net result over max drawdown; `0` when there was no drawdown.
    pub recovery_factor: Decimal,

    // IV. Distribution
    pub win_rate_pct: Decimal,
    pub average_win: Decimal,
    /// Mean magnitude of losing trades (reported positive).
    pub average_loss: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,

    // V. Streak
    /// The trailing run of same-signed results: positive count for wins,
    /// negative count for losses, `0` right after a zero-result trade.
    pub current_streak: i64,
}
