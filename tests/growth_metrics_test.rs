//! Growth metrics scenarios over whole tables

mod common;

use common::{step_series, table_of};
use edutrend::analytics::growth::{
    calculate_growth_metrics, Action, Diagnosis, Volatility, LOW_BASE_SENTINEL,
};
use edutrend::analytics::insights::{generate_insights, ConfidencePolicy, MarketStage};
use edutrend::report::format_growth_rate;

#[test]
fn test_steady_rise_of_twenty_five_percent() {
    let table = table_of(&[("파이썬", step_series(90, 20.0, 22.0, 25.0))]);
    let rows = calculate_growth_metrics(&table);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!((row.growth_rate - 25.0).abs() < 1e-9);
    assert!((row.recent_interest - 25.0).abs() < 1e-9);
    assert_eq!(row.volatility, Volatility::Low);
    assert_eq!(row.diagnosis, Diagnosis::SustainedRise);
    assert_eq!(row.action, Action::NewCourse);
    assert_eq!(format_growth_rate(row.growth_rate), "+25.0%");
}

#[test]
fn test_near_zero_base_yields_sentinel() {
    let table = table_of(&[("노코드", step_series(90, 0.5, 5.0, 10.0))]);
    let row = &calculate_growth_metrics(&table)[0];

    assert_eq!(row.growth_rate, LOW_BASE_SENTINEL);
    assert!(row.is_low_base());
    assert_eq!(row.diagnosis, Diagnosis::LowBaseSpike);
    assert_eq!(row.action, Action::ShortTermTest);
    assert_eq!(format_growth_rate(row.growth_rate), "N/A");
}

#[test]
fn test_forty_percent_zeros_is_insufficient_and_volatile() {
    let mut series = vec![30.0; 90];
    series[..36].fill(0.0);
    let table = table_of(&[("블록체인", series)]);
    let row = &calculate_growth_metrics(&table)[0];

    assert!((row.stats.zero_ratio - 0.4).abs() < 1e-9);
    assert_eq!(row.diagnosis, Diagnosis::InsufficientData);
    // Over 30% zeros forces a coefficient of variation above 0.5
    assert_eq!(row.volatility, Volatility::High);
    assert_eq!(row.action, Action::ShortTermTest);
}

#[test]
fn test_decline_is_excluded() {
    let table = table_of(&[("포토샵", step_series(90, 40.0, 35.0, 30.0))]);
    let row = &calculate_growth_metrics(&table)[0];

    assert!((row.growth_rate + 25.0).abs() < 1e-9);
    assert_eq!(row.diagnosis, Diagnosis::Declining);
    assert_eq!(row.action, Action::Exclude);
}

#[test]
fn test_flat_series_action_depends_on_interest() {
    let table = table_of(&[("엑셀", vec![50.0; 90]), ("SQL", vec![30.0; 90])]);
    let rows = calculate_growth_metrics(&table);

    assert_eq!(rows[0].diagnosis, Diagnosis::Flat);
    assert_eq!(rows[0].action, Action::Refresh);
    assert_eq!(rows[1].diagnosis, Diagnosis::Flat);
    assert_eq!(rows[1].action, Action::Hold);
}

#[test]
fn test_rows_follow_column_order() {
    let table = table_of(&[
        ("c", vec![10.0; 30]),
        ("a", vec![10.0; 30]),
        ("b", vec![10.0; 30]),
    ]);
    let keywords: Vec<_> = calculate_growth_metrics(&table)
        .into_iter()
        .map(|r| r.keyword)
        .collect();
    assert_eq!(keywords, vec!["c", "a", "b"]);
}

#[test]
fn test_rising_keyword_becomes_priority() {
    let table = table_of(&[
        ("파이썬", step_series(90, 20.0, 22.0, 25.0)),
        ("엑셀", vec![50.0; 90]),
    ]);
    let metrics = calculate_growth_metrics(&table);
    let insights = generate_insights(&metrics, &[], &[], &ConfidencePolicy::default());

    assert_eq!(insights.summary.total_keywords, 2);
    assert_eq!(insights.summary.priority_count, 1);
    assert_eq!(insights.priorities[0].keyword, "파이썬");
    assert_eq!(
        insights.keyword("엑셀").map(|k| k.stage),
        Some(MarketStage::Maturity)
    );
}
