//! Job descriptors handed to the external cluster scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::params::Hyperparams;

/// Unique sweep run identifier.
pub type SweepId = Uuid;

/// One planned training job.
///
/// Ownership of the run passes to the external scheduler at submission; the
/// orchestrator never observes the job again except through its result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Sweep this job belongs to.
    pub sweep_id: SweepId,

    /// Job sequence number (0-indexed, assigned during planning).
    pub index: usize,

    /// The hyperparameter combination this job trains.
    pub params: Hyperparams,

    /// Where the training run writes its result log.
    pub log_path: PathBuf,

    /// Where the training run saves its model checkpoint.
    pub checkpoint_path: PathBuf,

    /// Training data CSV (externally supplied).
    pub data_path: PathBuf,

    /// Precomputed molecular features file (externally supplied).
    pub features_path: PathBuf,
}

impl JobSpec {
    /// The nine positional arguments passed to the training script, in the
    /// order the script expects them. This order is a compatibility contract
    /// with the cluster-side script and must not change.
    pub fn positional_args(&self) -> Vec<String> {
        vec![
            self.params.batch_size.to_string(),
            self.params.hidden_size.to_string(),
            self.params.ffn_num_layers.to_string(),
            self.params.depth.to_string(),
            self.params.seed.to_string(),
            self.checkpoint_path.display().to_string(),
            self.log_path.display().to_string(),
            self.data_path.display().to_string(),
            self.features_path.display().to_string(),
        ]
    }
}

/// What the scheduler answered for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    /// Scheduler-assigned job id, when one could be parsed from the
    /// submission output (Slurm prints `Submitted batch job <id>`).
    pub scheduler_job_id: Option<u64>,

    pub submitted_at: DateTime<Utc>,
}

impl JobHandle {
    pub fn new(scheduler_job_id: Option<u64>) -> Self {
        Self {
            scheduler_job_id,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_args_order_is_fixed() {
        let spec = JobSpec {
            sweep_id: Uuid::new_v4(),
            index: 0,
            params: Hyperparams {
                batch_size: 64,
                hidden_size: 9,
                ffn_num_layers: 2,
                depth: 2,
                seed: 0,
            },
            log_path: PathBuf::from("work/64_9_2_2_0.txt"),
            checkpoint_path: PathBuf::from("work/model/64_9_2_2_0_model.pt"),
            data_path: PathBuf::from("train.csv"),
            features_path: PathBuf::from("features.npz"),
        };

        assert_eq!(
            spec.positional_args(),
            vec![
                "64",
                "9",
                "2",
                "2",
                "0",
                "work/model/64_9_2_2_0_model.pt",
                "work/64_9_2_2_0.txt",
                "train.csv",
                "features.npz",
            ]
        );
    }
}
