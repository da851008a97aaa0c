//! Holt-Winters triple exponential smoothing with grid-searched parameters
//!
//! Multiplicative seasonality, additive trend:
//!
//! ```text
//! Level:    S_t = α x_t / I_{t-L} + (1 - α)(S_{t-1} + B_{t-1})
//! Trend:    B_t = γ (S_t - S_{t-1}) + (1 - γ) B_{t-1}
//! Season:   I_t = β x_t / S_t + (1 - β) I_{t-L}
//! Forecast: F_{t+m} = (S_t + m B_t) I_{t-L+m}
//! ```
//!
//! Before the first full season (`t < L`) the level ignores the seasonal
//! index and the index is not updated. The smoothing constants and the season
//! length `L` are chosen by exhaustive search: every combination from the
//! configured grid, every `L` with `2L < n`, lowest in-sample MSE wins and the
//! first candidate in search order wins a tie.

use crate::config::SearchConfig;
use crate::metrics::mean_squared_error;
use crate::models::{ForecastResult, Forecaster, ModelParameters};
use log::{debug, warn};
use rayon::prelude::*;

/// Holt-Winters forecaster with brute-force parameter selection
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Grid and evaluation settings
    config: SearchConfig,
}

/// A candidate that passed the validity gate, with its score
#[derive(Debug, Clone, Copy)]
struct ScoredCandidate {
    /// Position in search order
    index: usize,
    params: ModelParameters,
    mse: f64,
}

impl ScoredCandidate {
    fn beats(&self, other: &Self) -> bool {
        self.mse < other.mse || (self.mse == other.mse && self.index < other.index)
    }
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self::new()
    }
}

impl HoltWinters {
    /// Create a forecaster that searches the default grid
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create a forecaster with a custom search configuration
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            name: "Holt-Winters".to_string(),
            config,
        }
    }

    /// Get the search configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// All candidate parameter sets for a series of `len` observations, in
    /// search order: alpha, then beta, then gamma, then ascending period.
    pub fn candidates(&self, len: usize) -> Vec<ModelParameters> {
        let grid = &self.config.smoothing_grid;
        let mut candidates = Vec::with_capacity(self.config.combinations() * len / 2);

        for &alpha in grid {
            for &beta in grid {
                for &gamma in grid {
                    for period in (1..).take_while(|&p| 2 * p < len) {
                        candidates.push(ModelParameters::new(alpha, beta, gamma, period));
                    }
                }
            }
        }

        candidates
    }

    /// Fit a single candidate model.
    ///
    /// Returns the fitted array of length `series.len() + horizon`, where
    /// slot `i + horizon` holds the forecast made from observation `i`, or
    /// `None` when the candidate is not a valid model for this input.
    pub fn fit_candidate(
        series: &[f64],
        params: ModelParameters,
        horizon: usize,
    ) -> Option<Vec<f64>> {
        if !valid_args(series, &params, horizon) {
            return None;
        }

        let period = params.period;
        let seasons = series.len() / period;
        let level = series[0];
        let trend = initial_trend(series, period);
        let seasonal = seasonal_indices(series, period, seasons);

        Some(smooth(series, level, trend, &seasonal, &params, horizon))
    }

    fn score(
        series: &[f64],
        index: usize,
        params: ModelParameters,
        horizon: usize,
    ) -> Option<ScoredCandidate> {
        let fitted = Self::fit_candidate(series, params, horizon)?;
        let mse = mean_squared_error(series, &fitted, params.period);

        // NaN and +inf never replace the running best
        (mse < f64::INFINITY).then_some(ScoredCandidate { index, params, mse })
    }

    fn search(&self, series: &[f64], horizon: usize) -> Option<ScoredCandidate> {
        let candidates = self.candidates(series.len());

        let best = if self.config.parallel {
            candidates
                .par_iter()
                .enumerate()
                .filter_map(|(index, &params)| Self::score(series, index, params, horizon))
                .reduce_with(|a, b| if b.beats(&a) { b } else { a })
        } else {
            candidates
                .iter()
                .enumerate()
                .filter_map(|(index, &params)| Self::score(series, index, params, horizon))
                .fold(None, |best: Option<ScoredCandidate>, candidate| match best {
                    Some(current) if candidate.mse >= current.mse => Some(current),
                    _ => Some(candidate),
                })
        };

        debug!(
            "{}: searched {} candidates over {} observations (horizon {})",
            self.name,
            candidates.len(),
            series.len(),
            horizon
        );

        best
    }
}

impl Forecaster for HoltWinters {
    fn fit_and_forecast(&self, series: &[f64], horizon: usize) -> ForecastResult {
        let best = self.search(series, horizon).and_then(|best| {
            Self::fit_candidate(series, best.params, horizon).map(|fitted| (best, fitted))
        });

        match best {
            Some((best, fitted)) => {
                debug!(
                    "{}: selected {} with mse {}",
                    self.name, best.params, best.mse
                );
                ForecastResult::from_fit(series, fitted, best.params)
            }
            None => {
                warn!(
                    "{}: no valid model for {} observations with horizon {}",
                    self.name,
                    series.len(),
                    horizon
                );
                ForecastResult::degenerate(series)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fit and forecast with the default search grid
pub fn fit_and_forecast(series: &[f64], horizon: usize) -> ForecastResult {
    HoltWinters::new().fit_and_forecast(series, horizon)
}

fn valid_args(series: &[f64], params: &ModelParameters, horizon: usize) -> bool {
    if series.is_empty() {
        return false;
    }
    if horizon == 0 || horizon > params.period {
        return false;
    }
    // The trend seed reads two full seasons
    if 2 * params.period > series.len() {
        return false;
    }

    [params.alpha, params.beta, params.gamma]
        .iter()
        .all(|c| (0.0..=1.0).contains(c))
}

fn initial_trend(series: &[f64], period: usize) -> f64 {
    let sum: f64 = (0..period).map(|i| series[period + i] - series[i]).sum();
    sum / (period * period) as f64
}

fn seasonal_indices(series: &[f64], period: usize, seasons: usize) -> Vec<f64> {
    let cycle_averages: Vec<f64> = series
        .chunks_exact(period)
        .take(seasons)
        .map(|cycle| cycle.iter().sum::<f64>() / period as f64)
        .collect();

    (0..period)
        .map(|offset| {
            let ratios: f64 = cycle_averages
                .iter()
                .enumerate()
                .map(|(season, avg)| series[season * period + offset] / avg)
                .sum();
            ratios / seasons as f64
        })
        .collect()
}

fn smooth(
    series: &[f64],
    initial_level: f64,
    initial_trend: f64,
    initial_seasonal: &[f64],
    params: &ModelParameters,
    horizon: usize,
) -> Vec<f64> {
    let ModelParameters {
        alpha,
        beta,
        gamma,
        period,
    } = *params;
    let len = series.len();
    let total = len + horizon;
    let m = horizon as f64;

    // Slots the recursion never assigns stay NaN and poison whatever reads them
    let mut level = vec![f64::NAN; total];
    let mut trend = vec![f64::NAN; total];
    let mut seasonal = vec![f64::NAN; total];
    let mut fitted = vec![0.0; total];

    level[1] = initial_level;
    trend[1] = initial_trend;
    seasonal[..period].copy_from_slice(initial_seasonal);

    for i in 2..len {
        let projected = level[i - 1] + trend[i - 1];
        level[i] = if i >= period {
            (alpha * series[i]) / seasonal[i - period] + (1.0 - alpha) * projected
        } else {
            alpha * series[i] + (1.0 - alpha) * projected
        };

        trend[i] = gamma * (level[i] - level[i - 1]) + (1.0 - gamma) * trend[i - 1];

        if i >= period {
            seasonal[i] = (beta * series[i]) / level[i] + (1.0 - beta) * seasonal[i - period];
        }

        if i + horizon >= period {
            fitted[i + horizon] = (level[i] + m * trend[i]) * seasonal[i + horizon - period];
        }
    }

    fitted
}
