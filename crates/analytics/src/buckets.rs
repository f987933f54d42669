//! Time-bucket breakdowns: intraday (hourly) and monthly-by-strategy views.

use crate::aggregate::aggregate_by;
use crate::math::{mean, safe_ratio};
use configuration::AnalyticsParams;
use core_types::TradeRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// A calendar month column key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<&TradeRecord> for YearMonth {
    fn from(record: &TradeRecord) -> Self {
        use chrono::Datelike;
        Self {
            year: record.date.year(),
            month: record.date.month(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hourly breakdown
// ---------------------------------------------------------------------------

/// Per-hour statistics inside the configured session window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStat {
    pub hour: u32,
    pub trade_count: usize,
    /// Arithmetic mean result of the trades in this hour.
    pub mean_result: Decimal,
    /// Running sum of the hourly means up to and including this hour. A
    /// cumulative of means, not of sums: it visualizes how the average trade
    /// decays through the session without volume effects.
    pub cumulative_mean: Decimal,
    /// Mean of the strictly positive results in this hour, rounded to the
    /// nearest currency unit; `0` when the hour had no winners.
    pub recommended_gain: Decimal,
    /// Mean magnitude of the strictly negative results, inflated by the
    /// configured safety multiplier and rounded; `0` with no losers.
    pub recommended_stop: Decimal,
}

/// The intraday view: one row per session hour that saw at least one trade.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HourlyBreakdown {
    pub hours: Vec<HourlyStat>,
    /// The hour at which the cumulative-of-means series peaks.
    pub peak_hour: Option<u32>,
    pub peak_value: Decimal,
    /// `peak_value` minus the final cumulative value, when positive. `None`
    /// means the session showed no intraday decay; presentation renders that
    /// as "no decay" rather than a negative number.
    pub decay: Option<Decimal>,
}

/// Buckets trades by hour-of-day inside `params`' session window.
///
/// Trades outside the window are ignored; hours without trades produce no
/// row (their mean is undefined, not zero).
pub fn hourly_breakdown(records: &[TradeRecord], params: &AnalyticsParams) -> HourlyBreakdown {
    let mut by_hour: BTreeMap<u32, Vec<Decimal>> = BTreeMap::new();
    for record in records {
        let hour = record.hour();
        if hour >= params.session_start_hour && hour <= params.session_end_hour {
            by_hour.entry(hour).or_default().push(record.result);
        }
    }

    let mut breakdown = HourlyBreakdown::default();
    let mut cumulative = Decimal::ZERO;

    for (hour, results) in by_hour {
        let mean_result = mean(&results);
        cumulative += mean_result;

        let winners: Vec<Decimal> = results.iter().filter(|r| **r > Decimal::ZERO).copied().collect();
        let losers: Vec<Decimal> = results
            .iter()
            .filter(|r| **r < Decimal::ZERO)
            .map(|r| r.abs())
            .collect();

        breakdown.hours.push(HourlyStat {
            hour,
            trade_count: results.len(),
            mean_result,
            cumulative_mean: cumulative,
            recommended_gain: round_currency(mean(&winners)),
            recommended_stop: round_currency(mean(&losers) * params.stop_safety_multiplier),
        });

        // First hour reaching the maximum wins ties.
        if breakdown.peak_hour.is_none() || cumulative > breakdown.peak_value {
            breakdown.peak_hour = Some(hour);
            breakdown.peak_value = cumulative;
        }
    }

    let decay = breakdown.peak_value - cumulative;
    breakdown.decay = (decay > Decimal::ZERO).then_some(decay);

    breakdown
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Monthly x strategy matrix
// ---------------------------------------------------------------------------

/// One cell of the monthly matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyCell {
    pub sum: Decimal,
    pub trade_count: usize,
    pub win_count: usize,
}

impl MonthlyCell {
    fn absorb(&mut self, other: &MonthlyCell) {
        self.sum += other.sum;
        self.trade_count += other.trade_count;
        self.win_count += other.win_count;
    }
}

/// A two-dimensional table of strategy rows against calendar-month columns.
///
/// A cell absent from the table means "no trades for that strategy in that
/// month", which is distinct from a present cell whose sum happens to be
/// exactly zero.
#[derive(Debug, Clone, Default)]
pub struct MonthlyStrategyMatrix {
    /// Row labels, sorted lexicographically.
    pub strategies: Vec<String>,
    /// Column keys, sorted chronologically.
    pub months: Vec<YearMonth>,
    cells: BTreeMap<(String, YearMonth), MonthlyCell>,
}

impl MonthlyStrategyMatrix {
    /// Builds the matrix from the record set.
    pub fn build(records: &[TradeRecord]) -> Self {
        let mut matrix = Self::default();

        for record in records {
            let key = (record.strategy.clone(), YearMonth::from(record));
            let cell = matrix.cells.entry(key).or_default();
            cell.sum += record.result;
            cell.trade_count += 1;
            if record.result > Decimal::ZERO {
                cell.win_count += 1;
            }
        }

        for (strategy, month) in matrix.cells.keys() {
            if matrix.strategies.last() != Some(strategy) {
                matrix.strategies.push(strategy.clone());
            }
            if !matrix.months.contains(month) {
                matrix.months.push(*month);
            }
        }
        matrix.strategies.dedup();
        matrix.months.sort();

        matrix
    }

    /// The cell for one strategy in one month, if any trades exist there.
    pub fn cell(&self, strategy: &str, month: YearMonth) -> Option<&MonthlyCell> {
        self.cells.get(&(strategy.to_string(), month))
    }

    /// Totals across all months for one strategy (the totals column).
    pub fn strategy_totals(&self, strategy: &str) -> MonthlyCell {
        let mut totals = MonthlyCell::default();
        for month in &self.months {
            if let Some(cell) = self.cell(strategy, *month) {
                totals.absorb(cell);
            }
        }
        totals
    }

    /// Totals across all strategies for one month (the totals row).
    pub fn month_totals(&self, month: YearMonth) -> MonthlyCell {
        let mut totals = MonthlyCell::default();
        for strategy in &self.strategies {
            if let Some(cell) = self.cell(strategy, month) {
                totals.absorb(cell);
            }
        }
        totals
    }
}

// ---------------------------------------------------------------------------
// Monthly percent-return table
// ---------------------------------------------------------------------------

/// Percent returns for one calendar year against a running notional capital.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPercentRow {
    pub year: i32,
    /// Index 0 is January. `None` marks a month with no recorded trades,
    /// which is not the same as a month that netted exactly `0%`.
    pub months: [Option<Decimal>; 12],
    /// The year's return, compounding the recorded months multiplicatively.
    pub accumulated_pct: Decimal,
}

/// Builds one row per year present in the record set.
///
/// The notional capital starts at `starting_capital` at the beginning of
/// each year and absorbs every month's net result as the year progresses, so
/// a month's percentage is measured against the capital actually carried
/// into it.
pub fn monthly_percent_table(
    records: &[TradeRecord],
    starting_capital: Decimal,
) -> Vec<MonthlyPercentRow> {
    let monthly = aggregate_by(records, |record| YearMonth::from(record));

    let mut years: BTreeMap<i32, [Option<Decimal>; 12]> = BTreeMap::new();
    for (idx, (ym, month_result)) in monthly.iter().enumerate() {
        // The aggregator emits chronologically, so the capital carried into
        // this month is the notional base plus every earlier month of the
        // same year.
        let capital = monthly[..idx]
            .iter()
            .filter(|(earlier, _)| earlier.year == ym.year)
            .fold(starting_capital, |acc, (_, result)| acc + *result);

        let pct = safe_ratio(*month_result, capital) * Decimal::ONE_HUNDRED;
        years.entry(ym.year).or_default()[ym.month as usize - 1] = Some(pct);
    }

    years
        .into_iter()
        .map(|(year, months)| {
            let compounded = months.iter().flatten().fold(Decimal::ONE, |acc, pct| {
                acc * (Decimal::ONE + *pct / Decimal::ONE_HUNDRED)
            });
            MonthlyPercentRow {
                year,
                months,
                accumulated_pct: (compounded - Decimal::ONE) * Decimal::ONE_HUNDRED,
            }
        })
        .collect()
}
