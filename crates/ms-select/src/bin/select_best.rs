//! `ms-select-best` — pick the best sweep run, predict, and score it.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ms_select::{
    run_selection, CommandPredictor, Predictor, RangeGroup, SelectionConfig, StubPredictor,
};
use ms_types::ObjectiveDirection;

#[derive(Debug, Parser)]
#[command(
    name = "ms-select-best",
    about = "Select the best sweep run and score its held-out predictions"
)]
struct Args {
    /// Directory of per-job result logs
    log_dir: PathBuf,

    /// Output file for the final metric report
    output_name: PathBuf,

    /// Summary-line keyword to look for in each log
    #[arg(long, default_value = "Overall")]
    keyword: String,

    /// Whether lower (min) or higher (max) scores win
    #[arg(long, default_value = "min")]
    direction: ObjectiveDirection,

    /// Checkpoint directory (default: <log_dir>/model)
    #[arg(long)]
    checkpoint_dir: Option<PathBuf>,

    /// Held-out test CSV with the true target values
    #[arg(long, default_value = "test_bdz.csv")]
    test_path: PathBuf,

    /// Molecular features file for the prediction run
    #[arg(long, default_value = "features.npz")]
    features_path: PathBuf,

    /// Prediction command template; {checkpoint}, {test}, and {features}
    /// are substituted before the command is run
    #[arg(long)]
    predict_cmd: Option<String>,

    /// Target column name in truth and prediction CSVs
    #[arg(long, default_value = "logS")]
    target_column: String,

    /// Keep the captured predictions CSV at this path
    #[arg(long)]
    predictions_out: Option<PathBuf>,

    /// Row-range group scored separately, as name:start:end (repeatable)
    #[arg(long = "group")]
    groups: Vec<RangeGroup>,

    /// Read the predictions CSV from this file instead of running the
    /// prediction command (for rescoring an existing run)
    #[arg(long)]
    predictions_in: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = SelectionConfig::new(args.log_dir, args.output_name, args.test_path.clone());
    config.keyword = args.keyword;
    config.direction = args.direction;
    config.checkpoint_dir = args.checkpoint_dir;
    config.target_column = args.target_column;
    config.predictions_out = args.predictions_out;
    config.groups = args.groups;

    let predictor: Box<dyn Predictor> = match args.predictions_in {
        Some(path) => Box::new(StubPredictor::new(std::fs::read_to_string(path)?)),
        None => {
            let mut predictor = CommandPredictor::new(args.test_path, args.features_path);
            if let Some(template) = args.predict_cmd {
                predictor = predictor.with_template(template);
            }
            Box::new(predictor)
        }
    };

    let (best, report) = run_selection(&config, predictor.as_ref()).await?;
    println!(
        "best run: {} (score {:.6})",
        best.log.source_file.display(),
        best.log.score
    );
    print!("{report}");

    Ok(())
}
