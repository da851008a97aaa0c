//! Conversion between maintenance dates and interval series

use crate::data::MaintenanceHistory;
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, ModelParameters};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Predicted maintenance dates for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePrediction {
    /// Predicted completion dates, oldest first
    pub predicted_dates: Vec<NaiveDate>,
    /// Rounded day gaps that produced `predicted_dates`
    pub predicted_intervals: Vec<i64>,
    /// Model selected for the interval series
    pub parameters: ModelParameters,
    /// In-sample mean squared error of that model
    pub mse: f64,
}

/// Whether a timeline entry was observed or forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Existing,
    Predicted,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Existing => write!(f, "Existing"),
            EntryKind::Predicted => write!(f, "Predicted"),
        }
    }
}

/// One row of the combined history/prediction timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub kind: EntryKind,
    pub date: NaiveDate,
    /// Days since the previous entry, `None` for the first
    pub days_since_previous: Option<i64>,
}

/// Day gaps between consecutive completion dates, after sorting them
pub fn interval_series(dates: &[NaiveDate]) -> Result<Vec<f64>> {
    if dates.len() < 2 {
        return Err(ForecastError::InsufficientData(format!(
            "At least 2 completion dates are needed, got {}",
            dates.len()
        )));
    }

    let mut sorted = dates.to_vec();
    sorted.sort_unstable();

    Ok(sorted
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days() as f64)
        .collect())
}

/// Forecast the next `horizon` maintenance dates of an asset.
///
/// Each forecast interval is rounded to whole days and added to the previous
/// date, starting from the most recent completion.
pub fn predict_maintenance_dates<F: Forecaster>(
    history: &MaintenanceHistory,
    horizon: usize,
    model: &F,
) -> Result<MaintenancePrediction> {
    let intervals = interval_series(history.dates())?;
    let result = model.forecast(&intervals, horizon)?;

    let mut current = history.last_date().ok_or_else(|| {
        ForecastError::DataError(format!("Asset {} has no history", history.asset_id()))
    })?;

    let mut predicted_dates = Vec::with_capacity(horizon);
    let mut predicted_intervals = Vec::with_capacity(horizon);

    for &interval in result.forecast() {
        let days = round_interval(interval)?;
        current = current
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| {
                ForecastError::ValidationError(format!(
                    "Predicted date overflows after {} + {} days",
                    current, days
                ))
            })?;
        predicted_intervals.push(days);
        predicted_dates.push(current);
    }

    Ok(MaintenancePrediction {
        predicted_dates,
        predicted_intervals,
        parameters: result.parameters(),
        mse: result.mse,
    })
}

fn round_interval(interval: f64) -> Result<i64> {
    if !interval.is_finite() {
        return Err(ForecastError::ValidationError(format!(
            "Forecast interval is not finite: {}",
            interval
        )));
    }

    let days = interval.round();
    if days < 0.0 {
        return Err(ForecastError::ValidationError(format!(
            "Forecast interval is negative: {}",
            interval
        )));
    }

    Ok(days as i64)
}

/// Existing and predicted dates merged in date order, with day gaps
pub fn timeline(
    history: &MaintenanceHistory,
    prediction: &MaintenancePrediction,
) -> Vec<TimelineEntry> {
    let mut entries: Vec<(EntryKind, NaiveDate)> = history
        .dates()
        .iter()
        .map(|&d| (EntryKind::Existing, d))
        .chain(
            prediction
                .predicted_dates
                .iter()
                .map(|&d| (EntryKind::Predicted, d)),
        )
        .collect();
    entries.sort_by_key(|&(_, date)| date);

    let mut previous: Option<NaiveDate> = None;
    entries
        .into_iter()
        .map(|(kind, date)| {
            let days_since_previous = previous.map(|p| (date - p).num_days());
            previous = Some(date);
            TimelineEntry {
                kind,
                date,
                days_since_previous,
            }
        })
        .collect()
}
