//! Search configuration for the Holt-Winters grid search

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smoothing constants tried for each of alpha, beta and gamma.
pub const DEFAULT_SMOOTHING_GRID: [f64; 7] = [0.0, 0.1, 0.2, 0.4, 0.6, 0.8, 1.0];

/// Controls how the candidate grid is built and evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Values tried for every smoothing constant, in search order
    pub smoothing_grid: Vec<f64>,
    /// Evaluate candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            smoothing_grid: DEFAULT_SMOOTHING_GRID.to_vec(),
            parallel: true,
        }
    }
}

impl SearchConfig {
    /// Create a new search configuration
    ///
    /// Values outside `[0, 1]` are accepted here; the candidates built from
    /// them are skipped during the search.
    pub fn new(smoothing_grid: Vec<f64>, parallel: bool) -> Result<Self> {
        let config = Self {
            smoothing_grid,
            parallel,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default grid evaluated on the calling thread only
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of (alpha, beta, gamma) combinations in the grid
    pub fn combinations(&self) -> usize {
        self.smoothing_grid.len().pow(3)
    }

    fn validate(&self) -> Result<()> {
        if self.smoothing_grid.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Smoothing grid must not be empty".to_string(),
            ));
        }

        if let Some(bad) = self.smoothing_grid.iter().find(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Smoothing grid values must be finite, got {}",
                bad
            )));
        }

        Ok(())
    }
}
