//! # Tradesight Analytics Engine
//!
//! The deterministic aggregation and statistics core of the trading journal.
//! It transforms a raw list of discrete trade records into equity curves,
//! risk ratios, time-bucketed breakdowns and cross-strategy correlation.
//!
//! ## Architectural Principles
//!
//! - **Pure computation:** every entry point is a pure function from a record
//!   set to plain data structures. There is no I/O and no shared mutable
//!   state, so rerunning any component on an unchanged record set yields
//!   bit-identical output, and concurrent invocations are safe by construction.
//! - **Degenerate-but-defined:** empty input, zero-variance series and
//!   zero-denominator ratios resolve to documented fallback values instead of
//!   panicking; the only `Result` in the public API is correlation's
//!   "insufficient data".
//! - **Raw numerics out:** no formatting, localization or currency symbols;
//!   those belong to the presentation layer.

pub mod aggregate;
pub mod buckets;
pub mod correlation;
pub mod engine;
pub mod equity;
pub mod error;
pub mod math;
pub mod normalizer;
pub mod report;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{
    DailyBucket, aggregate_by, daily_totals, daily_totals_by_hour, daily_totals_by_strategy,
};
pub use buckets::{
    HourlyBreakdown, HourlyStat, MonthlyCell, MonthlyPercentRow, MonthlyStrategyMatrix, YearMonth,
    hourly_breakdown, monthly_percent_table,
};
pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use engine::{AnalyticsEngine, current_streak};
pub use equity::{EquityCurve, EquityPoint, equity_curve};
pub use error::AnalyticsError;
pub use normalizer::{NormalizedBatch, normalize_records};
pub use report::{MetricsSnapshot, ProfitFactor};
