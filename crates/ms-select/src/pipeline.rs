//! The selection pipeline: scan → select → predict → score → report.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use ms_types::{MsResult, ObjectiveDirection};

use crate::logs::{scan_logs, DEFAULT_KEYWORD};
use crate::metrics::{
    compute_metrics, parse_target_column, read_target_column, RangeGroup, ScoreReport,
    DEFAULT_TARGET_COLUMN,
};
use crate::predict::Predictor;
use crate::select::{resolve_checkpoint, select_best, BestRun};

/// Inputs for one selection pass.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Directory of per-job result logs.
    pub log_dir: PathBuf,

    /// Where the final metric report is written.
    pub output_path: PathBuf,

    /// Summary-line keyword.
    pub keyword: String,

    /// Whether lower or higher summary scores win.
    pub direction: ObjectiveDirection,

    /// Where checkpoints live; defaults to `<log_dir>/model`.
    pub checkpoint_dir: Option<PathBuf>,

    /// Held-out test CSV carrying the true target values.
    pub truth_path: PathBuf,

    /// Target column name in truth and prediction CSVs.
    pub target_column: String,

    /// Optionally keep the captured predictions CSV.
    pub predictions_out: Option<PathBuf>,

    /// Row-range groups scored separately.
    pub groups: Vec<RangeGroup>,
}

impl SelectionConfig {
    pub fn new(
        log_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        truth_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            log_dir: log_dir.into(),
            output_path: output_path.into(),
            keyword: DEFAULT_KEYWORD.to_string(),
            direction: ObjectiveDirection::default(),
            checkpoint_dir: None,
            truth_path: truth_path.into(),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            predictions_out: None,
            groups: Vec::new(),
        }
    }

    fn checkpoint_dir(&self) -> PathBuf {
        self.checkpoint_dir
            .clone()
            .unwrap_or_else(|| self.log_dir.join("model"))
    }
}

/// Run the full selection pass and write the metric report.
///
/// Returns the winning run and the computed report; the report text has
/// also been written to `config.output_path` by the time this returns.
pub async fn run_selection(
    config: &SelectionConfig,
    predictor: &dyn Predictor,
) -> MsResult<(BestRun, ScoreReport)> {
    let scores = scan_logs(&config.log_dir, &config.keyword)?;
    info!(logs = scores.len(), dir = %config.log_dir.display(), "scanned result logs");

    let best = select_best(&scores, config.direction)?.clone();
    let checkpoint_path = resolve_checkpoint(&best, &config.checkpoint_dir())?;

    let predictions_csv = predictor.predict(&checkpoint_path).await?;
    if let Some(out) = &config.predictions_out {
        fs::write(out, &predictions_csv).await?;
        info!(path = %out.display(), "wrote predictions");
    }

    let truth = read_target_column(&config.truth_path, &config.target_column)?;
    let predictions = parse_target_column(
        &predictions_csv,
        Path::new("<prediction output>"),
        &config.target_column,
    )?;
    let report = compute_metrics(&truth, &predictions, &config.groups)?;

    fs::write(&config.output_path, report.to_string()).await?;
    info!(
        path = %config.output_path.display(),
        rmse = report.rmse,
        "wrote metric report"
    );

    Ok((
        BestRun {
            log: best,
            checkpoint_path,
        },
        report,
    ))
}
