use chrono::NaiveDate;
use clap::Parser;
use maintenance_forecast::data::{DataLoader, MaintenanceHistory, MaintenanceRecord};
use maintenance_forecast::mock::generate_history;
use maintenance_forecast::schedule::{predict_maintenance_dates, timeline};
use maintenance_forecast::{ForecastError, HoltWinters, SearchConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Predict upcoming maintenance dates for a park asset
#[derive(Debug, Parser)]
#[command(name = "predict_maintenance", version)]
struct Args {
    /// CSV file with `asset_id,completed_date` rows
    #[arg(short, long, conflicts_with = "mock")]
    input: Option<PathBuf>,

    /// Generate this many random completion dates instead of reading a file
    #[arg(long)]
    mock: Option<usize>,

    /// Seed for --mock
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Asset to forecast; defaults to the first asset in the input
    #[arg(short, long)]
    asset: Option<String>,

    /// Number of future maintenance dates to predict
    #[arg(long, default_value_t = 5)]
    horizon: usize,

    /// JSON search configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluate the grid on a single thread
    #[arg(long)]
    sequential: bool,
}

fn load_records(args: &Args) -> Result<Vec<MaintenanceRecord>, ForecastError> {
    match (&args.input, args.mock) {
        (Some(path), _) => DataLoader::from_csv(path),
        (None, Some(count)) => {
            let asset = args.asset.as_deref().unwrap_or("asset-001");
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or_else(|| {
                ForecastError::InvalidParameter("Invalid mock start date".to_string())
            })?;
            let end = chrono::Utc::now().date_naive();
            let mut rng = StdRng::seed_from_u64(args.seed);
            generate_history(&mut rng, asset, start, end, count)
        }
        (None, None) => Err(ForecastError::InvalidParameter(
            "Either --input or --mock is required".to_string(),
        )),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };
    if args.sequential {
        config.parallel = false;
    }

    let records = load_records(&args)?;
    let asset = match &args.asset {
        Some(asset) => asset.clone(),
        None => DataLoader::asset_ids(&records)
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::DataError("Input has no records".to_string()))?,
    };
    let history = MaintenanceHistory::from_records(&records, &asset)?;
    log::info!(
        "Loaded {} completed maintenance tasks for {}",
        history.len(),
        asset
    );

    let model = HoltWinters::with_config(config);
    let prediction = predict_maintenance_dates(&history, args.horizon, &model)?;

    println!("Asset: {}", asset);
    println!("Model: {}", prediction.parameters);
    println!("MSE:   {:.4}", prediction.mse);
    println!();
    println!("| Type      | Date       | Interval (days) |");
    println!("|-----------|------------|-----------------|");
    for entry in timeline(&history, &prediction) {
        let interval = entry
            .days_since_previous
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "| {:<9} | {} | {:>15} |",
            entry.kind.to_string(),
            entry.date,
            interval
        );
    }

    Ok(())
}
