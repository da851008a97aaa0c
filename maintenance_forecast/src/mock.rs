//! Synthetic maintenance histories for demos and tests

use crate::data::MaintenanceRecord;
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Draw `count` completion dates uniformly from `[start, end]`.
///
/// Records are returned oldest first. Pass a seeded RNG for a reproducible
/// history.
pub fn generate_history<R: Rng + ?Sized>(
    rng: &mut R,
    asset_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    count: usize,
) -> Result<Vec<MaintenanceRecord>> {
    if end < start {
        return Err(ForecastError::InvalidParameter(format!(
            "End date {} is before start date {}",
            end, start
        )));
    }

    let span = (end - start).num_days();
    let mut records: Vec<MaintenanceRecord> = (0..count)
        .map(|_| {
            let offset = rng.gen_range(0..=span);
            MaintenanceRecord::new(asset_id, start + Duration::days(offset))
        })
        .collect();
    records.sort_by_key(|r| r.completed_date);

    Ok(records)
}
