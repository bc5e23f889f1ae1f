//! Sweep configuration and job planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use ms_types::{GridError, JobSpec, SweepId};

use crate::grid::ParamGrid;

/// Everything a sweep needs: the external inputs, the working directory,
/// and the grid to enumerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub id: SweepId,

    /// Training data CSV handed through to every job.
    pub data_path: PathBuf,

    /// Molecular features file handed through to every job.
    pub features_path: PathBuf,

    /// Directory that receives one result log per job; checkpoints go to
    /// its `model/` subdirectory.
    pub work_dir: PathBuf,

    pub grid: ParamGrid,

    pub created_at: DateTime<Utc>,
}

impl SweepConfig {
    pub fn new(
        data_path: impl Into<PathBuf>,
        features_path: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            data_path: data_path.into(),
            features_path: features_path.into(),
            work_dir: work_dir.into(),
            grid: ParamGrid::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_grid(mut self, grid: ParamGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.grid.repeats = repeats;
        self
    }

    /// Where checkpoints for this sweep live.
    pub fn model_dir(&self) -> PathBuf {
        self.work_dir.join("model")
    }
}

/// Plan one job per combination. Deterministic and idempotent: identical
/// configs yield identical specs, including job indices and paths.
pub fn plan_jobs(config: &SweepConfig) -> Result<Vec<JobSpec>, GridError> {
    let model_dir = config.model_dir();
    let jobs = config
        .grid
        .combinations()?
        .into_iter()
        .enumerate()
        .map(|(index, params)| JobSpec {
            sweep_id: config.id,
            index,
            params,
            log_path: config.work_dir.join(params.log_file_name()),
            checkpoint_path: model_dir.join(params.checkpoint_file_name()),
            data_path: config.data_path.clone(),
            features_path: config.features_path.clone(),
        })
        .collect();
    Ok(jobs)
}
