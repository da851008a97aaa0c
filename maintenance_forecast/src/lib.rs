//! # Maintenance Forecast
//!
//! Predicts the next maintenance dates of park assets (sensors, hubs,
//! facilities) from the history of completed maintenance tasks.
//!
//! ## Features
//!
//! - Holt-Winters triple exponential smoothing with multiplicative seasonality
//! - Exhaustive grid search over smoothing constants and season length,
//!   sequential or parallel with identical results
//! - In-sample error measures (MSE, SSE, MPE)
//! - Maintenance history loading from CSV and conversion to interval series
//! - Conversion of forecast intervals back to calendar dates
//!
//! ## Quick Start
//!
//! ```rust
//! use maintenance_forecast::models::holt_winters::fit_and_forecast;
//!
//! let intervals = vec![10.0, 12.0, 9.0, 11.0, 10.0, 13.0, 9.0, 12.0];
//! let result = fit_and_forecast(&intervals, 1);
//!
//! assert!(!result.is_degenerate());
//! assert_eq!(result.history(), &intervals[..]);
//! assert_eq!(result.forecast().len(), 1);
//! ```
//!
//! Going from dates to dates:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use maintenance_forecast::data::MaintenanceHistory;
//! use maintenance_forecast::models::holt_winters::HoltWinters;
//! use maintenance_forecast::schedule::predict_maintenance_dates;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let dates = [0, 10, 22, 31, 42, 52, 65, 74, 86]
//!     .iter()
//!     .map(|&d| start + chrono::Duration::days(d))
//!     .collect();
//! let history = MaintenanceHistory::new("sensor-7", dates);
//!
//! let prediction = predict_maintenance_dates(&history, 2, &HoltWinters::new())?;
//! assert_eq!(prediction.predicted_dates.len(), 2);
//! # Ok::<(), maintenance_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod mock;
pub mod models;
pub mod schedule;

// Re-export commonly used types
pub use crate::config::SearchConfig;
pub use crate::data::{DataLoader, MaintenanceHistory, MaintenanceRecord};
pub use crate::error::ForecastError;
pub use crate::models::holt_winters::{fit_and_forecast, HoltWinters};
pub use crate::models::{ForecastResult, Forecaster, ModelParameters};
pub use crate::schedule::{predict_maintenance_dates, MaintenancePrediction};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
