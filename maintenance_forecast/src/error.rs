//! Error types for the maintenance_forecast crate

use thiserror::Error;

/// Custom error types for the maintenance_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// No candidate model could be fitted to the series
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error related to result validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading CSV input
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}
