//! Prediction collaborator.
//!
//! The actual prediction run belongs to the external ML framework; this
//! module only owns the subprocess boundary. [`CommandPredictor`] renders a
//! command template and captures stdout as the predictions CSV;
//! [`StubPredictor`] keeps tests in-process.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use ms_types::PredictError;

/// Result alias for predictor operations.
pub type PredictResult<T> = Result<T, PredictError>;

/// Default prediction command, mirroring the framework's predict entry
/// point. Placeholders are substituted before the command is split.
pub const DEFAULT_COMMAND_TEMPLATE: &str =
    "python predict.py --test_path {test} --features_path {features} --checkpoint_path {checkpoint}";

/// Runs the held-out prediction for a selected checkpoint and returns the
/// predictions CSV text.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, checkpoint_path: &Path) -> PredictResult<String>;

    /// Human-readable predictor name.
    fn name(&self) -> &str;
}

/// Shells out to the external prediction command.
#[derive(Debug, Clone)]
pub struct CommandPredictor {
    /// Command template with `{checkpoint}`, `{test}`, and `{features}`
    /// placeholders. Split on whitespace after substitution, so the
    /// substituted paths must not contain spaces.
    pub template: String,
    pub test_path: PathBuf,
    pub features_path: PathBuf,
}

impl CommandPredictor {
    pub fn new(test_path: impl Into<PathBuf>, features_path: impl Into<PathBuf>) -> Self {
        Self {
            template: DEFAULT_COMMAND_TEMPLATE.to_string(),
            test_path: test_path.into(),
            features_path: features_path.into(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    fn render(&self, checkpoint_path: &Path) -> Vec<String> {
        self.template
            .replace("{checkpoint}", &checkpoint_path.display().to_string())
            .replace("{test}", &self.test_path.display().to_string())
            .replace("{features}", &self.features_path.display().to_string())
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl Predictor for CommandPredictor {
    async fn predict(&self, checkpoint_path: &Path) -> PredictResult<String> {
        let argv = self.render(checkpoint_path);
        let (program, args) = argv.split_first().ok_or(PredictError::EmptyCommand)?;

        debug!(command = %argv.join(" "), "invoking prediction");
        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| PredictError::SpawnFailed {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PredictError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let predictions = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(
            checkpoint = %checkpoint_path.display(),
            bytes = predictions.len(),
            "prediction finished"
        );
        Ok(predictions)
    }

    fn name(&self) -> &str {
        "command"
    }
}

/// Returns a canned predictions CSV; for tests and pipeline dry runs.
#[derive(Debug, Clone)]
pub struct StubPredictor {
    pub output: String,
}

impl StubPredictor {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    async fn predict(&self, _checkpoint_path: &Path) -> PredictResult<String> {
        Ok(self.output.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}
