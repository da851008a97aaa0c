use approx::assert_relative_eq;
use maintenance_forecast::config::{SearchConfig, DEFAULT_SMOOTHING_GRID};
use maintenance_forecast::metrics::mean_squared_error;
use maintenance_forecast::models::holt_winters::{fit_and_forecast, HoltWinters};
use maintenance_forecast::models::{ForecastResult, Forecaster, ModelParameters};
use maintenance_forecast::ForecastError;
use pretty_assertions::assert_eq;
use rstest::rstest;

const SMALL_SERIES: [f64; 8] = [10.0, 12.0, 9.0, 11.0, 10.0, 13.0, 9.0, 12.0];

const MONTHLY_INTERVALS: [f64; 12] = [
    30.0, 21.0, 29.0, 31.0, 40.0, 48.0, 53.0, 47.0, 37.0, 39.0, 31.0, 29.0,
];

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

fn assert_same_result(a: &ForecastResult, b: &ForecastResult) {
    assert_eq!(a.parameters(), b.parameters());
    assert_eq!(a.mse.to_bits(), b.mse.to_bits());
    assert_eq!(a.sse.to_bits(), b.sse.to_bits());
    assert_eq!(a.mpe.to_bits(), b.mpe.to_bits());
    assert_eq!(bits(&a.augmented_series), bits(&b.augmented_series));
}

#[test]
fn test_known_small_series() {
    let result = fit_and_forecast(&SMALL_SERIES, 1);

    assert!(!result.is_degenerate());
    assert!(result.period >= 1 && result.period <= 3);
    assert!(result.mse.is_finite());
    assert!(result.mse >= 0.0);
    assert!(result.sse.is_finite());
    assert_eq!(result.augmented_series.len(), SMALL_SERIES.len() + 1);
}

#[rstest]
#[case(&SMALL_SERIES, 1)]
#[case(&SMALL_SERIES, 2)]
#[case(&SMALL_SERIES, 3)]
#[case(&MONTHLY_INTERVALS, 1)]
#[case(&MONTHLY_INTERVALS, 4)]
fn test_history_is_reproduced_verbatim(#[case] series: &[f64], #[case] horizon: usize) {
    let result = fit_and_forecast(series, horizon);

    assert!(!result.is_degenerate());
    assert_eq!(result.augmented_series.len(), series.len() + horizon);
    assert_eq!(result.history(), series);
    assert_eq!(result.forecast().len(), horizon);
    assert_eq!(result.observed_len(), series.len());
}

#[rstest]
#[case(&SMALL_SERIES, 1)]
#[case(&MONTHLY_INTERVALS, 2)]
fn test_parameters_come_from_grid(#[case] series: &[f64], #[case] horizon: usize) {
    let result = fit_and_forecast(series, horizon);

    for constant in [result.alpha, result.beta, result.gamma] {
        assert!(DEFAULT_SMOOTHING_GRID.contains(&constant));
    }
    assert!(result.period >= horizon);
    assert!(result.period <= series.len() / 2 - 1);
}

#[test]
fn test_period_one_loses_on_longer_series() {
    // From four observations on, period 1 reads an unassigned seasonal index
    // inside the scoring window and scores NaN
    let result = fit_and_forecast(&SMALL_SERIES, 1);
    assert!(result.period >= 2);

    let result = fit_and_forecast(&[7.0, 8.0, 6.0, 9.0], 1);
    assert!(result.is_degenerate());
}

#[test]
fn test_three_observations_select_period_one() {
    // The unassigned index only reaches the forecast slot, so every
    // candidate scores the same finite mse and the first one wins
    let result = fit_and_forecast(&[7.0, 8.0, 6.0], 1);

    assert_eq!(result.parameters(), ModelParameters::new(0.0, 0.0, 0.0, 1));
    assert_eq!(result.sse, 100.0);
    assert_eq!(result.mse, 50.0);
    assert_eq!(result.history(), &[7.0, 8.0, 6.0]);
    assert_eq!(result.forecast().len(), 1);
    assert!(result.forecast()[0].is_nan());
    assert!(!result.is_degenerate());
}

#[test]
fn test_horizon_equal_to_largest_period() {
    let result = fit_and_forecast(&SMALL_SERIES, 3);

    assert_eq!(result.period, 3);
    assert_eq!(result.augmented_series.len(), 11);
}

#[test]
fn test_fit_is_deterministic() {
    let first = fit_and_forecast(&MONTHLY_INTERVALS, 2);
    let second = fit_and_forecast(&MONTHLY_INTERVALS, 2);

    assert_same_result(&first, &second);
}

#[rstest]
#[case(&SMALL_SERIES, 1)]
#[case(&SMALL_SERIES, 3)]
#[case(&MONTHLY_INTERVALS, 2)]
#[case(&MONTHLY_INTERVALS, 5)]
fn test_parallel_matches_sequential(#[case] series: &[f64], #[case] horizon: usize) {
    let parallel = HoltWinters::with_config(SearchConfig::default());
    let sequential = HoltWinters::with_config(SearchConfig::sequential());

    assert_same_result(
        &parallel.fit_and_forecast(series, horizon),
        &sequential.fit_and_forecast(series, horizon),
    );
}

#[test]
fn test_metrics_match_winning_candidate() {
    let result = fit_and_forecast(&MONTHLY_INTERVALS, 2);
    let fitted =
        HoltWinters::fit_candidate(&MONTHLY_INTERVALS, result.parameters(), 2).unwrap();

    let mse = mean_squared_error(&MONTHLY_INTERVALS, &fitted, result.period);
    assert_eq!(mse.to_bits(), result.mse.to_bits());
    assert_eq!(
        bits(result.forecast()),
        bits(&fitted[MONTHLY_INTERVALS.len()..])
    );
}

#[test]
fn test_tie_goes_to_first_candidate() {
    let constant = [5.0; 8];

    // Both candidates fit a flat series exactly
    for gamma in [0.0, 0.1] {
        let params = ModelParameters::new(0.0, 0.0, gamma, 3);
        let fitted = HoltWinters::fit_candidate(&constant, params, 1).unwrap();
        assert_eq!(mean_squared_error(&constant, &fitted, 3), 0.0);
    }

    for config in [SearchConfig::default(), SearchConfig::sequential()] {
        let result = HoltWinters::with_config(config).fit_and_forecast(&constant, 1);
        assert_eq!(result.parameters(), ModelParameters::new(0.0, 0.0, 0.0, 3));
        assert_eq!(result.mse, 0.0);
        assert_eq!(result.forecast(), &[5.0]);
    }
}

#[rstest]
#[case(&[], 1)] // sse is NaN here too, not the empty sum
#[case(&[4.0, 5.0], 1)]
#[case(&SMALL_SERIES, 0)]
#[case(&SMALL_SERIES, 4)]
fn test_degenerate_input(#[case] series: &[f64], #[case] horizon: usize) {
    let result = fit_and_forecast(series, horizon);

    assert!(result.is_degenerate());
    assert_eq!(result.period, 0);
    assert_eq!(result.parameters(), ModelParameters::default());
    assert_eq!(result.augmented_series, series.to_vec());
    assert!(result.forecast().is_empty());
    assert!(result.mse.is_nan());
    assert!(result.sse.is_nan());
    assert!(result.mpe.is_nan());
}

#[test]
fn test_explicit_forecast_reports_degenerate_fit() {
    let model = HoltWinters::new();

    assert!(matches!(
        model.forecast(&[], 1),
        Err(ForecastError::InsufficientData(_))
    ));
    assert!(matches!(
        model.forecast(&SMALL_SERIES, 4),
        Err(ForecastError::InsufficientData(_))
    ));
    assert!(matches!(
        model.forecast(&SMALL_SERIES, 0),
        Err(ForecastError::InvalidParameter(_))
    ));

    let result = model.forecast(&SMALL_SERIES, 2).unwrap();
    assert_eq!(result.forecast().len(), 2);
}

#[test]
fn test_out_of_range_grid_values_are_skipped() {
    let config = SearchConfig::new(vec![-0.5, 0.2, 1.5], false).unwrap();
    let result = HoltWinters::with_config(config).fit_and_forecast(&SMALL_SERIES, 1);

    assert_eq!(result.alpha, 0.2);
    assert_eq!(result.beta, 0.2);
    assert_eq!(result.gamma, 0.2);
}

#[test]
fn test_result_serializes_to_json() {
    let result = fit_and_forecast(&SMALL_SERIES, 1);
    let json = result.to_json().unwrap();

    assert!(json.contains("augmented_series"));
    assert!(json.contains("\"period\""));
}

#[test]
fn test_result_round_trips_through_json() {
    let result = fit_and_forecast(&SMALL_SERIES, 1);
    let restored: ForecastResult = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(restored.history(), &SMALL_SERIES);
    assert_eq!(restored.parameters(), result.parameters());
    assert_eq!(restored.forecast().len(), 1);
    assert_relative_eq!(restored.forecast()[0], result.forecast()[0], epsilon = 1e-9);
}

#[test]
fn test_deserialized_result_with_short_series_does_not_panic() {
    let json = r#"{
        "augmented_series": [10.0, 12.0],
        "alpha": 0.2, "beta": 0.1, "gamma": 0.1, "period": 3,
        "mse": 1.5, "sse": 7.5, "mpe": 0.01,
        "observed": 5
    }"#;
    let result: ForecastResult = serde_json::from_str(json).unwrap();

    assert_eq!(result.observed_len(), 5);
    assert_eq!(result.history(), &[10.0, 12.0]);
    assert!(result.forecast().is_empty());
}
