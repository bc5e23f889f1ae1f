//! Parsed log scores and the best-score direction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The typed result of parsing one result log: which file, what score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogScore {
    pub source_file: PathBuf,
    pub score: f64,
}

/// Whether a lower or a higher score wins.
///
/// The sweep's summary metric is a regression error (rmse), so the default
/// is `Minimize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveDirection {
    Minimize,
    Maximize,
}

impl Default for ObjectiveDirection {
    fn default() -> Self {
        Self::Minimize
    }
}

impl ObjectiveDirection {
    /// Does `candidate` beat `incumbent` under this direction?
    pub fn is_improvement(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Minimize => candidate < incumbent,
            Self::Maximize => candidate > incumbent,
        }
    }
}

impl std::str::FromStr for ObjectiveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "min" | "minimize" => Ok(Self::Minimize),
            "max" | "maximize" => Ok(Self::Maximize),
            other => Err(format!("unknown direction: {other} (expected min or max)")),
        }
    }
}

impl std::fmt::Display for ObjectiveDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimize => write!(f, "min"),
            Self::Maximize => write!(f, "max"),
        }
    }
}
