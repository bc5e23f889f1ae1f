//! `ms-score` — score an existing predictions CSV against the truth set.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ms_select::{compute_metrics, read_target_column, RangeGroup};

#[derive(Debug, Parser)]
#[command(name = "ms-score", about = "Score a predictions CSV against held-out truth")]
struct Args {
    /// Predictions CSV produced by a prediction run
    predictions_csv: PathBuf,

    /// Output file for the metric report
    output_name: PathBuf,

    /// Held-out test CSV with the true target values
    #[arg(long, default_value = "test_bdz.csv")]
    truth: PathBuf,

    /// Target column name in truth and prediction CSVs
    #[arg(long, default_value = "logS")]
    target_column: String,

    /// Row-range group scored separately, as name:start:end (repeatable)
    #[arg(long = "group")]
    groups: Vec<RangeGroup>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let truth = read_target_column(&args.truth, &args.target_column)?;
    let predictions = read_target_column(&args.predictions_csv, &args.target_column)?;
    let report = compute_metrics(&truth, &predictions, &args.groups)?;

    std::fs::write(&args.output_name, report.to_string())?;
    print!("{report}");

    Ok(())
}
