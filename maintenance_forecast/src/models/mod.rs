//! Forecasting models for maintenance interval series

use crate::error::{ForecastError, Result};
use crate::metrics::FitMetrics;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Parameters that define one fitted Holt-Winters model
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Level smoothing constant
    pub alpha: f64,
    /// Seasonal index smoothing constant
    pub beta: f64,
    /// Trend smoothing constant
    pub gamma: f64,
    /// Season length in observations
    pub period: usize,
}

impl ModelParameters {
    /// Create a new parameter set
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            period,
        }
    }
}

impl std::fmt::Display for ModelParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "alpha={}, beta={}, gamma={}, period={}",
            self.alpha, self.beta, self.gamma, self.period
        )
    }
}

/// Observed series extended with its forecast, plus the fitted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Original observations followed by the forecast values
    pub augmented_series: Vec<f64>,
    /// Level smoothing constant
    pub alpha: f64,
    /// Seasonal index smoothing constant
    pub beta: f64,
    /// Trend smoothing constant
    pub gamma: f64,
    /// Season length, 0 when no model could be fitted
    pub period: usize,
    /// In-sample mean squared error
    pub mse: f64,
    /// In-sample sum of squared errors
    pub sse: f64,
    /// In-sample mean percentage error
    pub mpe: f64,
    /// Number of observations the model was fitted on
    observed: usize,
}

impl ForecastResult {
    /// Build a result from a fitted array of length `series.len() + horizon`
    ///
    /// The leading `series.len()` slots are replaced by the observations.
    pub(crate) fn from_fit(series: &[f64], mut fitted: Vec<f64>, params: ModelParameters) -> Self {
        let metrics = FitMetrics::evaluate(series, &fitted, params.period);
        fitted[..series.len()].copy_from_slice(series);

        Self {
            augmented_series: fitted,
            alpha: params.alpha,
            beta: params.beta,
            gamma: params.gamma,
            period: params.period,
            mse: metrics.mse,
            sse: metrics.sse,
            mpe: metrics.mpe,
            observed: series.len(),
        }
    }

    /// Result carried when no candidate model passed the search
    pub(crate) fn degenerate(series: &[f64]) -> Self {
        let params = ModelParameters::default();
        let metrics = FitMetrics::undefined();

        Self {
            augmented_series: series.to_vec(),
            alpha: params.alpha,
            beta: params.beta,
            gamma: params.gamma,
            period: params.period,
            mse: metrics.mse,
            sse: metrics.sse,
            mpe: metrics.mpe,
            observed: series.len(),
        }
    }

    /// True when no model was fitted and the series carries no forecast
    pub fn is_degenerate(&self) -> bool {
        self.period == 0
    }

    /// The selected model parameters
    pub fn parameters(&self) -> ModelParameters {
        ModelParameters::new(self.alpha, self.beta, self.gamma, self.period)
    }

    /// In-sample error measures
    pub fn metrics(&self) -> FitMetrics {
        FitMetrics {
            mse: self.mse,
            sse: self.sse,
            mpe: self.mpe,
        }
    }

    /// Number of observations the model was fitted on
    pub fn observed_len(&self) -> usize {
        self.observed
    }

    /// The observations, reproduced verbatim
    pub fn history(&self) -> &[f64] {
        self.split().0
    }

    /// The extrapolated values that follow the observations
    pub fn forecast(&self) -> &[f64] {
        self.split().1
    }

    // A deserialized result may claim more observations than it carries
    fn split(&self) -> (&[f64], &[f64]) {
        let observed = self.observed.min(self.augmented_series.len());
        self.augmented_series.split_at(observed)
    }

    /// Serialize the result to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Common interface for forecasting models
pub trait Forecaster: Debug {
    /// Fit a model to `series` and extend it by `horizon` values
    ///
    /// Never fails: when no model fits, the result is degenerate (see
    /// [`ForecastResult::is_degenerate`]).
    fn fit_and_forecast(&self, series: &[f64], horizon: usize) -> ForecastResult;

    /// Get the name of the model
    fn name(&self) -> &str;

    /// Like [`Forecaster::fit_and_forecast`], but reports a degenerate fit as an error
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1".to_string(),
            ));
        }

        let result = self.fit_and_forecast(series, horizon);
        if result.is_degenerate() {
            return Err(ForecastError::InsufficientData(format!(
                "No {} model fits {} observations with horizon {}",
                self.name(),
                series.len(),
                horizon
            )));
        }

        Ok(result)
    }
}

pub mod holt_winters;
