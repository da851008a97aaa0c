use chrono::{Duration, NaiveDate};
use maintenance_forecast::data::MaintenanceHistory;
use maintenance_forecast::models::holt_winters::HoltWinters;
use maintenance_forecast::models::Forecaster;
use maintenance_forecast::schedule::{interval_series, predict_maintenance_dates};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Maintenance Forecast: Basic Example");
    println!("===================================\n");

    let history = create_sample_history();
    println!(
        "{} completed tasks for {}, last on {}\n",
        history.len(),
        history.asset_id(),
        history.last_date().map(|d| d.to_string()).unwrap_or_default()
    );

    // Fit the interval series directly
    let intervals = interval_series(history.dates())?;
    println!("Intervals (days): {:?}", intervals);

    let model = HoltWinters::new();
    let result = model.forecast(&intervals, 3)?;
    println!("Selected model: {}", result.parameters());
    print!("{}", result.metrics());
    println!("Forecast intervals: {:?}\n", result.forecast());

    // Or go straight from dates to dates
    let prediction = predict_maintenance_dates(&history, 3, &model)?;
    for (i, date) in prediction.predicted_dates.iter().enumerate() {
        println!(
            "Next maintenance #{}: {} (+{} days)",
            i + 1,
            date,
            prediction.predicted_intervals[i]
        );
    }

    Ok(())
}

/// A sensor serviced roughly monthly, with a longer gap every third visit
fn create_sample_history() -> MaintenanceHistory {
    let start = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap_or_default();
    let gaps = [28, 30, 45, 29, 31, 44, 27, 30, 46, 28, 29, 45];

    let mut dates = vec![start];
    let mut current = start;
    for gap in gaps {
        current = current + Duration::days(gap);
        dates.push(current);
    }

    MaintenanceHistory::new("sensor-0042", dates)
}
