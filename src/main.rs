use analytics::{
    AnalyticsEngine, CorrelationMatrix, EquityCurve, HourlyBreakdown, MetricsSnapshot,
    MonthlyStrategyMatrix, ProfitFactor, correlation_matrix, daily_totals, equity_curve,
    hourly_breakdown, monthly_percent_table, normalize_records,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::Config;
use core_types::{RawTradeRecord, TradeRecord};
use risk::RiskAlertEvaluator;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Tradesight journal analytics application.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = configuration::load_config()?;
    let records = load_records(&cli.input, cli.from, cli.to, cli.strategy.as_deref())?;

    match cli.command {
        Commands::Report => handle_report(&records, &config)?,
        Commands::Hourly => handle_hourly(&records, &config),
        Commands::Monthly => handle_monthly(&records, &config),
        Commands::Correlation => handle_correlation(&records),
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Deterministic performance analytics over a trading-journal export.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON export of raw trade records.
    #[arg(long, short)]
    input: PathBuf,

    /// Only include trades on or after this date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include trades on or before this date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Only include trades with this strategy label.
    #[arg(long)]
    strategy: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// The full metrics snapshot, equity summary and risk alerts.
    Report,
    /// Intraday breakdown by hour-of-day, with gain/stop recommendations.
    Hourly,
    /// Monthly results per strategy plus the percent-return table.
    Monthly,
    /// Pairwise correlation between strategy daily-return series.
    Correlation,
}

// ==============================================================================
// Record loading
// ==============================================================================

/// Reads, canonicalizes and filters the record set the engine will see.
///
/// Filtering happens here, at the application boundary: the engine itself
/// always reflects exactly the record set it is handed.
fn load_records(
    input: &PathBuf,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    strategy: Option<&str>,
) -> Result<Vec<TradeRecord>> {
    let raw_text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let raw: Vec<RawTradeRecord> =
        serde_json::from_str(&raw_text).context("input is not a JSON array of trade records")?;

    let batch = normalize_records(&raw);
    if batch.skipped > 0 {
        println!(
            "Note: {} malformed record(s) were skipped; results cover the valid subset.",
            batch.skipped
        );
    }

    Ok(batch
        .records
        .into_iter()
        .filter(|r| from.is_none_or(|d| r.date >= d))
        .filter(|r| to.is_none_or(|d| r.date <= d))
        .filter(|r| strategy.is_none_or(|s| r.strategy == s))
        .collect())
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_report(records: &[TradeRecord], config: &Config) -> Result<()> {
    let snapshot = AnalyticsEngine::new().metrics(records);
    let curve = equity_curve(&daily_totals(records));

    print_snapshot(&snapshot, &curve);

    let evaluator = RiskAlertEvaluator::new(config.risk.clone())?;
    let alerts = evaluator.evaluate(records);
    if alerts.is_empty() {
        println!("\nNo risk alerts.");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Severity", "Alert", "Detail"]);
        for alert in &alerts {
            table.add_row(vec![
                format!("{:?}", alert.severity),
                alert.title.clone(),
                alert.message.clone(),
            ]);
        }
        println!("\n{table}");
    }

    Ok(())
}

fn print_snapshot(snapshot: &MetricsSnapshot, curve: &EquityCurve) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Trades".to_string(), snapshot.total_trades.to_string()]);
    table.add_row(vec![
        "Net result".to_string(),
        snapshot.total_net_result.to_string(),
    ]);
    table.add_row(vec![
        "Win rate".to_string(),
        format!("{:.1}%", snapshot.win_rate_pct),
    ]);
    table.add_row(vec![
        "Profit factor".to_string(),
        format_profit_factor(snapshot.profit_factor),
    ]);
    table.add_row(vec![
        "Expectancy".to_string(),
        format!("{:.2}", snapshot.expectancy),
    ]);
    table.add_row(vec![
        "Sharpe (daily)".to_string(),
        format!("{:.2}", snapshot.sharpe_ratio),
    ]);
    table.add_row(vec![
        "Max drawdown".to_string(),
        snapshot.max_drawdown.to_string(),
    ]);
    table.add_row(vec![
        "Recovery factor".to_string(),
        format!("{:.2}", snapshot.recovery_factor),
    ]);
    table.add_row(vec![
        "Average win / loss".to_string(),
        format!("{:.2} / {:.2}", snapshot.average_win, snapshot.average_loss),
    ]);
    table.add_row(vec![
        "Best / worst trade".to_string(),
        format!("{} / {}", snapshot.best_trade, snapshot.worst_trade),
    ]);
    table.add_row(vec![
        "Current streak".to_string(),
        snapshot.current_streak.to_string(),
    ]);
    if let Some(point) = curve.points.last() {
        table.add_row(vec![
            "Equity (final)".to_string(),
            point.cumulative.to_string(),
        ]);
    }
    println!("{table}");
}

fn handle_hourly(records: &[TradeRecord], config: &Config) {
    let breakdown: HourlyBreakdown = hourly_breakdown(records, &config.analytics);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Hour", "Trades", "Mean", "Cumulative", "Gain", "Stop",
    ]);
    for stat in &breakdown.hours {
        table.add_row(vec![
            format!("{:02}:00", stat.hour),
            stat.trade_count.to_string(),
            format!("{:.2}", stat.mean_result),
            format!("{:.2}", stat.cumulative_mean),
            stat.recommended_gain.to_string(),
            stat.recommended_stop.to_string(),
        ]);
    }
    println!("{table}");

    match (breakdown.peak_hour, breakdown.decay) {
        (Some(hour), Some(decay)) => println!(
            "Peak at {hour:02}:00 ({:.2}); intraday decay of {decay:.2} after it.",
            breakdown.peak_value
        ),
        (Some(hour), None) => println!(
            "Peak at {hour:02}:00 ({:.2}); no decay.",
            breakdown.peak_value
        ),
        _ => println!("No trades inside the session window."),
    }
}

fn handle_monthly(records: &[TradeRecord], config: &Config) {
    let matrix = MonthlyStrategyMatrix::build(records);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["Strategy".to_string()];
    header.extend(
        matrix
            .months
            .iter()
            .map(|m| format!("{:04}-{:02}", m.year, m.month)),
    );
    header.push("Total".to_string());
    table.set_header(header);

    for strategy in &matrix.strategies {
        let mut row = vec![strategy.clone()];
        for month in &matrix.months {
            row.push(match matrix.cell(strategy, *month) {
                Some(cell) => format!("{} ({}/{})", cell.sum, cell.win_count, cell.trade_count),
                // No trades at all that month: distinct from a zero sum.
                None => "-".to_string(),
            });
        }
        row.push(matrix.strategy_totals(strategy).sum.to_string());
        table.add_row(row);
    }

    let mut totals = vec!["Total".to_string()];
    for month in &matrix.months {
        totals.push(matrix.month_totals(*month).sum.to_string());
    }
    let grand: Decimal = matrix
        .months
        .iter()
        .map(|m| matrix.month_totals(*m).sum)
        .sum();
    totals.push(grand.to_string());
    table.add_row(totals);
    println!("{table}");

    let starting_capital = config.analytics.starting_capital;
    println!("\nPercent returns on a notional {starting_capital} starting capital:");
    for row in monthly_percent_table(records, starting_capital) {
        let months: Vec<String> = row
            .months
            .iter()
            .map(|m| match m {
                Some(pct) => format!("{pct:.2}%"),
                None => "-".to_string(),
            })
            .collect();
        println!(
            "{}: [{}] accumulated {:.2}%",
            row.year,
            months.join(" "),
            row.accumulated_pct
        );
    }
}

fn handle_correlation(records: &[TradeRecord]) {
    let matrix: CorrelationMatrix = match correlation_matrix(records) {
        Ok(matrix) => matrix,
        Err(reason) => {
            println!("Correlation unavailable: {reason}");
            return;
        }
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec![String::new()];
    header.extend(matrix.strategies.iter().cloned());
    table.set_header(header);

    for (i, strategy) in matrix.strategies.iter().enumerate() {
        let mut row = vec![strategy.clone()];
        for j in 0..matrix.strategies.len() {
            row.push(format!("{:.2}", matrix.value(i, j)));
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn format_profit_factor(pf: ProfitFactor) -> String {
    match pf {
        ProfitFactor::Finite(value) => format!("{value:.2}"),
        ProfitFactor::Infinite => "∞".to_string(),
    }
}
