use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the MolSweep system
#[derive(Error, Debug)]
pub enum MsError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("Log error: {0}")]
    Log(#[from] LogError),

    #[error("Prediction error: {0}")]
    Predict(#[from] PredictError),

    #[error("Scoring error: {0}")]
    Score(#[from] ScoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Grid-enumeration errors
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Empty value set for axis: {axis}")]
    EmptyAxis { axis: String },

    #[error("Grid too large: {axis_sizes:?} combinations overflow usize")]
    Overflow { axis_sizes: Vec<usize> },
}

/// Job-submission errors
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Input file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("Failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} exited with {code:?}: {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Result-log parsing errors
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Could not read log {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("No line containing \"{keyword}\" in log: {path}")]
    NoSummaryLine { path: PathBuf, keyword: String },

    #[error("No finite score on summary line of {path}: {line:?}")]
    MalformedScore { path: PathBuf, line: String },

    #[error("No usable result logs in directory: {directory}")]
    NoResults { directory: PathBuf },

    #[error("Checkpoint for best run not found: {path}")]
    CheckpointMissing { path: PathBuf },
}

/// Prediction-subprocess errors
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Empty prediction command")]
    EmptyCommand,

    #[error("Failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Prediction command exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
}

/// Metric-computation errors
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Could not read CSV {path}: {message}")]
    CsvRead { path: PathBuf, message: String },

    #[error("Column {column} not found in {path}")]
    ColumnMissing { column: String, path: PathBuf },

    #[error("Non-numeric value for {column} at row {row} of {path}: {value:?}")]
    BadValue {
        column: String,
        row: usize,
        path: PathBuf,
        value: String,
    },

    #[error("Series length mismatch: {truth} truth rows vs {predictions} prediction rows")]
    LengthMismatch { truth: usize, predictions: usize },

    #[error("Empty series: no paired values to score")]
    EmptySeries,

    #[error("Group {name} range {start}..{end} is out of bounds for {len} rows")]
    GroupOutOfRange {
        name: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Result type alias for MolSweep operations
pub type MsResult<T> = Result<T, MsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SubmitError::NonZeroExit {
            program: "sbatch".to_string(),
            code: Some(1),
            stderr: "sbatch: error: invalid partition".to_string(),
        };

        assert!(error.to_string().contains("sbatch"));
        assert!(error.to_string().contains("invalid partition"));
    }

    #[test]
    fn test_error_conversion() {
        let log_error = LogError::NoResults {
            directory: PathBuf::from("work"),
        };
        let ms_error: MsError = log_error.into();

        match ms_error {
            MsError::Log(_) => (),
            _ => panic!("Expected Log error"),
        }
    }
}
