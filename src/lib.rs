//! # Park Forecast
//!
//! Workspace facade for the park-management forecasting crates.
//!
//! ## Example
//!
//! ```
//! use park_forecast_workspace::maintenance::fit_and_forecast;
//!
//! let result = fit_and_forecast(&[10.0, 12.0, 9.0, 11.0, 10.0, 13.0, 9.0, 12.0], 1);
//! assert_eq!(result.augmented_series.len(), 9);
//! ```

/// Maintenance-interval forecasting
pub use maintenance_forecast as maintenance;
