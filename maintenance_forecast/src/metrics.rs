//! In-sample error measures for fitted Holt-Winters models
//!
//! Every measure compares `fitted[i]` against `actual[i]` over the window
//! `[period, actual.len())`. A fitted slot that does not exist counts as NaN,
//! so a short or empty fitted array yields NaN rather than a misleading zero.

use serde::{Deserialize, Serialize};

/// Error measures for one fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Sum of Squared Errors
    pub sse: f64,
    /// Mean Percentage Error (absolute value of the mean)
    pub mpe: f64,
}

impl FitMetrics {
    /// Compute all three measures over the in-sample window
    pub fn evaluate(actual: &[f64], fitted: &[f64], period: usize) -> Self {
        Self {
            mse: mean_squared_error(actual, fitted, period),
            sse: sum_squared_error(actual, fitted, period),
            mpe: mean_percentage_error(actual, fitted, period),
        }
    }

    /// All measures NaN, used when no model was fitted
    pub fn undefined() -> Self {
        Self {
            mse: f64::NAN,
            sse: f64::NAN,
            mpe: f64::NAN,
        }
    }
}

impl std::fmt::Display for FitMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fit Metrics:")?;
        writeln!(f, "  MSE: {:.4}", self.mse)?;
        writeln!(f, "  SSE: {:.4}", self.sse)?;
        writeln!(f, "  MPE: {:.4}", self.mpe)?;
        Ok(())
    }
}

fn fitted_at(fitted: &[f64], i: usize) -> f64 {
    fitted.get(i).copied().unwrap_or(f64::NAN)
}

/// Sum of squared errors over `[period, actual.len())`
pub fn sum_squared_error(actual: &[f64], fitted: &[f64], period: usize) -> f64 {
    (period..actual.len())
        .map(|i| (fitted_at(fitted, i) - actual[i]).powi(2))
        .sum()
}

/// Mean squared error over `[period, actual.len())`
pub fn mean_squared_error(actual: &[f64], fitted: &[f64], period: usize) -> f64 {
    let window = actual.len().saturating_sub(period) as f64;
    sum_squared_error(actual, fitted, period) / window
}

/// Absolute mean percentage error over `[period, actual.len())`
///
/// Signed errors are averaged before taking the absolute value, so over- and
/// under-estimates cancel.
pub fn mean_percentage_error(actual: &[f64], fitted: &[f64], period: usize) -> f64 {
    let window = actual.len().saturating_sub(period) as f64;
    let sum: f64 = (period..actual.len())
        .map(|i| (fitted_at(fitted, i) - actual[i]) / actual[i])
        .sum();
    (sum / window).abs()
}
