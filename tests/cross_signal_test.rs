//! Cross-signal classification and normalization properties

mod common;

use common::{keywords, step_series, table_of};
use edutrend::analytics::correlation::{min_max_normalize, moving_average, pearson};
use edutrend::analytics::cross_signal::{analyze_cross_signals, SignalPattern, SignalStrength};
use edutrend::analytics::growth::calculate_growth_metrics;
use edutrend::models::TimeSeriesTable;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Patterns whose defining condition holds, in precedence order
fn matching_patterns(web: f64, video: f64) -> Vec<SignalPattern> {
    let rules = [
        (web.abs() < 15.0 && video > 30.0, SignalPattern::VideoConversion),
        (web > 10.0 && video > 10.0, SignalPattern::CombinedRise),
        (web > 15.0 && video < 5.0, SignalPattern::InformationSeeking),
        (web < -5.0 && video > 10.0, SignalPattern::ChannelShift),
        (web < -5.0 && video < -5.0, SignalPattern::InterestDecline),
        (web.abs() < 10.0 && video.abs() < 10.0, SignalPattern::Stable),
    ];
    rules
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, pattern)| pattern)
        .collect()
}

proptest! {
    #[test]
    fn prop_first_matching_rule_wins(web in -100.0f64..200.0, video in -100.0f64..200.0) {
        let pattern = SignalPattern::classify(web, video);
        let expected = matching_patterns(web, video)
            .first()
            .copied()
            .unwrap_or(SignalPattern::Mixed);
        prop_assert_eq!(pattern, expected);
    }

    #[test]
    fn prop_strength_is_fixed_per_pattern(web in -100.0f64..200.0, video in -100.0f64..200.0) {
        let pattern = SignalPattern::classify(web, video);
        let expected = match pattern {
            SignalPattern::VideoConversion | SignalPattern::CombinedRise => SignalStrength::High,
            SignalPattern::InterestDecline | SignalPattern::Mixed => SignalStrength::Low,
            _ => SignalStrength::Medium,
        };
        prop_assert_eq!(pattern.strength(), expected);
    }

    #[test]
    fn prop_normalized_values_stay_in_range(series in prop::collection::vec(0.0f64..100.0, 1..200)) {
        let normalized = min_max_normalize(&series);
        prop_assert_eq!(normalized.len(), series.len());
        for value in &normalized {
            prop_assert!((0.0..=100.0 + 1e-9).contains(value));
        }
    }

    #[test]
    fn prop_pearson_is_bounded(
        pairs in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 3..100)
    ) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Some(r) = pearson(&a, &b) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn prop_moving_average_keeps_length(
        series in prop::collection::vec(0.0f64..100.0, 0..120),
        window in 3usize..=14
    ) {
        let smoothed = moving_average(&series, window).unwrap();
        prop_assert_eq!(smoothed.len(), series.len());
        let leading = smoothed.iter().take_while(|v| v.is_none()).count();
        prop_assert_eq!(leading, (window - 1).min(series.len()));
    }
}

#[test]
fn test_boundary_values() {
    assert_eq!(SignalPattern::classify(0.0, 30.0), SignalPattern::Mixed);
    assert_eq!(SignalPattern::classify(0.0, 30.1), SignalPattern::VideoConversion);
    assert_eq!(SignalPattern::classify(10.0, 20.0), SignalPattern::Mixed);
    assert_eq!(SignalPattern::classify(12.0, 12.0), SignalPattern::CombinedRise);
    assert_eq!(SignalPattern::classify(20.0, 0.0), SignalPattern::InformationSeeking);
    assert_eq!(SignalPattern::classify(-10.0, 20.0), SignalPattern::ChannelShift);
    assert_eq!(SignalPattern::classify(-10.0, -10.0), SignalPattern::InterestDecline);
    assert_eq!(SignalPattern::classify(5.0, -5.0), SignalPattern::Stable);
}

#[test]
fn test_rows_use_real_video_when_present() {
    let web = table_of(&[("파이썬", vec![30.0; 90])]);
    let video = table_of(&[("파이썬", step_series(90, 10.0, 15.0, 20.0))]);
    let metrics = calculate_growth_metrics(&web);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let rows = analyze_cross_signals(&metrics, &video, &keywords(&["파이썬"]), &mut rng);
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].approximated);
    assert_eq!(rows[0].pattern, SignalPattern::VideoConversion);
    assert_eq!(rows[0].strength, SignalStrength::High);
}

#[test]
fn test_missing_video_is_approximated() {
    let web = table_of(&[("SQL", step_series(90, 20.0, 22.0, 25.0))]);
    let metrics = calculate_growth_metrics(&web);
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let rows = analyze_cross_signals(
        &metrics,
        &TimeSeriesTable::empty(),
        &keywords(&["SQL"]),
        &mut rng,
    );
    assert_eq!(rows.len(), 1);
    assert!(rows[0].approximated);
    assert!(rows[0].video_growth >= 12.5 && rows[0].video_growth <= 37.5);
}
