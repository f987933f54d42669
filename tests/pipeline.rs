//! End-to-end checks: raw journal rows in, metrics, buckets, correlation and
//! alerts out.

use analytics::{
    AnalyticsEngine, MonthlyStrategyMatrix, ProfitFactor, correlation_matrix, daily_totals,
    daily_totals_by_hour, equity_curve, hourly_breakdown, monthly_percent_table,
    normalize_records,
};
use configuration::{AnalyticsParams, RiskThresholds};
use core_types::{NO_STRATEGY, RawTradeRecord};
use risk::RiskAlertEvaluator;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn raw(date: &str, time: &str, strategy: Option<&str>, result: Decimal) -> RawTradeRecord {
    RawTradeRecord {
        date: Some(date.to_string()),
        time: Some(time.to_string()),
        asset: Some("WIN".to_string()),
        strategy: strategy.map(str::to_string),
        contracts: Some(2),
        costs: Some(dec!(1.5)),
        result: Some(result),
    }
}

fn journal() -> Vec<RawTradeRecord> {
    vec![
        raw("2024-05-06", "09:30:00", Some("Scalp"), dec!(120)),
        raw("2024-05-06", "10:10:00", Some("Swing"), dec!(-45)),
        raw("2024-05-07", "09:45:00", Some("Scalp"), dec!(-80)),
        raw("2024-05-07", "11:00:00", None, dec!(30)),
        raw("2024-05-08", "10:20:00", Some("Swing"), dec!(200)),
        raw("2024-05-09", "09:05:00", Some("Scalp"), dec!(0)),
        // Malformed: no parsable date.
        RawTradeRecord {
            result: Some(dec!(9999)),
            ..Default::default()
        },
    ]
}

#[test]
fn pipeline_produces_consistent_views_of_one_record_set() {
    let batch = normalize_records(&journal());
    assert_eq!(batch.skipped, 1);
    assert_eq!(batch.records.len(), 6);

    // The sentinel category absorbed the unlabeled trade.
    assert!(batch.records.iter().any(|r| r.strategy == NO_STRATEGY));

    // Aggregation preserves the grand total across every view.
    let total: Decimal = batch.records.iter().map(|r| r.result).sum();
    let daily = daily_totals(&batch.records);
    let daily_sum: Decimal = daily.iter().map(|b| b.result).sum();
    assert_eq!(daily_sum, total);

    let hourly_sum: Decimal = daily_totals_by_hour(&batch.records)
        .iter()
        .map(|(_, sum)| *sum)
        .sum();
    assert_eq!(hourly_sum, total);

    let curve = equity_curve(&daily);
    assert_eq!(curve.points.last().unwrap().cumulative, total);
    assert!(curve.max_drawdown >= Decimal::ZERO);

    let snapshot = AnalyticsEngine::new().metrics(&batch.records);
    assert_eq!(snapshot.total_trades, 6);
    assert_eq!(snapshot.total_net_result, total);
    assert_eq!(snapshot.winning_trades, 3);
    assert_eq!(snapshot.losing_trades, 2);
    // The zero-result trade dilutes the rate through the denominator only.
    assert_eq!(snapshot.win_rate_pct, dec!(50));
    assert_eq!(
        snapshot.profit_factor,
        ProfitFactor::Finite(dec!(350) / dec!(125))
    );

    let matrix = MonthlyStrategyMatrix::build(&batch.records);
    assert_eq!(
        matrix.strategies,
        vec![NO_STRATEGY.to_string(), "Scalp".to_string(), "Swing".to_string()]
    );
    let month_sum: Decimal = matrix
        .months
        .iter()
        .map(|m| matrix.month_totals(*m).sum)
        .sum();
    assert_eq!(month_sum, total);

    // Correlation sees Scalp and Swing; the sentinel is not a strategy.
    let correlation = correlation_matrix(&batch.records).unwrap();
    assert_eq!(correlation.strategies, vec!["Scalp", "Swing"]);
    assert_eq!(correlation.value(0, 0), Decimal::ONE);
    assert_eq!(correlation.value(0, 1), correlation.value(1, 0));
}

#[test]
fn hourly_and_percent_views_share_the_same_records() {
    let batch = normalize_records(&journal());
    let params = AnalyticsParams::default();

    let breakdown = hourly_breakdown(&batch.records, &params);
    let bucketed: usize = breakdown.hours.iter().map(|h| h.trade_count).sum();
    assert_eq!(bucketed, 6);

    let rows = monthly_percent_table(&batch.records, params.starting_capital);
    assert_eq!(rows.len(), 1);
    // May has data, April does not.
    assert!(rows[0].months[4].is_some());
    assert!(rows[0].months[3].is_none());
}

#[test]
fn alerts_fire_from_the_same_normalized_records() {
    // Eleven Scalp trades, two wins up front, then nine straight losses.
    let mut rows: Vec<RawTradeRecord> = Vec::new();
    for i in 0..11 {
        let result = if i < 2 { dec!(50) } else { dec!(-30) };
        rows.push(raw(
            &format!("2024-05-{:02}", 6 + i),
            "10:00:00",
            Some("Scalp"),
            result,
        ));
    }

    let batch = normalize_records(&rows);
    let evaluator = RiskAlertEvaluator::new(RiskThresholds::default()).unwrap();
    let alerts = evaluator.evaluate(&batch.records);

    // 100 peak, 270 given back: deep drawdown, long loss streak, and an
    // 18% win rate over 11 trades.
    assert!(alerts.iter().any(|a| a.id == "drawdown-window"));
    assert!(alerts.iter().any(|a| a.id == "loss-streak"));
    assert!(alerts.iter().any(|a| a.id == "strategy-underperforming:Scalp"));
}
