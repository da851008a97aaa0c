//! Maintenance history handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One completed maintenance task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Sensor, hub or facility the task was performed on
    pub asset_id: String,
    /// Day the task was completed (`YYYY-MM-DD`)
    pub completed_date: NaiveDate,
}

impl MaintenanceRecord {
    /// Create a new record
    pub fn new(asset_id: &str, completed_date: NaiveDate) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            completed_date,
        }
    }
}

/// Completion dates of a single asset, in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceHistory {
    asset_id: String,
    dates: Vec<NaiveDate>,
}

impl MaintenanceHistory {
    /// Create a history from unordered completion dates
    pub fn new(asset_id: &str, mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        Self {
            asset_id: asset_id.to_string(),
            dates,
        }
    }

    /// Collect the history of `asset_id` from a mixed set of records
    pub fn from_records(records: &[MaintenanceRecord], asset_id: &str) -> Result<Self> {
        let dates: Vec<NaiveDate> = records
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .map(|r| r.completed_date)
            .collect();

        if dates.is_empty() {
            return Err(ForecastError::DataError(format!(
                "No maintenance records for asset {}",
                asset_id
            )));
        }

        Ok(Self::new(asset_id, dates))
    }

    /// Get the asset identifier
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Get the completion dates, oldest first
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Most recent completion date
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Data loader for maintenance records
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load records from a CSV file with an `asset_id,completed_date` header
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MaintenanceRecord>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load records from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MaintenanceRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<MaintenanceRecord>, csv::Error>>()?;

        Ok(records)
    }

    /// Distinct asset identifiers, sorted
    pub fn asset_ids(records: &[MaintenanceRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.asset_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
