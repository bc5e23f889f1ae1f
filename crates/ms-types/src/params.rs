//! Hyperparameter combinations and the run-naming scheme.
//!
//! Both ends of the pipeline — the sweep submitter and the result selector —
//! must agree on how a combination maps to file names, so the naming lives
//! here. The scheme is `<batch>_<hidden>_<ffn>_<depth>_<seed>`: the log file
//! is `<stem>.txt` and the checkpoint is `<stem>_model.pt`. External training
//! jobs run concurrently against these paths, so every combination must map
//! to a unique stem.

use serde::{Deserialize, Serialize};

/// File extension of a per-job result log.
pub const LOG_EXTENSION: &str = "txt";

/// Suffix appended to a run stem to name its checkpoint.
pub const CHECKPOINT_SUFFIX: &str = "_model.pt";

/// One hyperparameter combination: a single training-run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hyperparams {
    pub batch_size: u32,
    pub hidden_size: u32,
    pub ffn_num_layers: u32,
    pub depth: u32,
    /// Random seed for the training run (the repeat index of the sweep).
    pub seed: u32,
}

impl Hyperparams {
    /// The unique basename shared by this combination's log and checkpoint.
    pub fn run_stem(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.batch_size, self.hidden_size, self.ffn_num_layers, self.depth, self.seed
        )
    }

    /// Result-log file name, e.g. `64_9_2_2_0.txt`.
    pub fn log_file_name(&self) -> String {
        format!("{}.{LOG_EXTENSION}", self.run_stem())
    }

    /// Checkpoint file name, e.g. `64_9_2_2_0_model.pt`.
    pub fn checkpoint_file_name(&self) -> String {
        format!("{}{CHECKPOINT_SUFFIX}", self.run_stem())
    }
}

impl std::fmt::Display for Hyperparams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "batch={} hidden={} ffn_layers={} depth={} seed={}",
            self.batch_size, self.hidden_size, self.ffn_num_layers, self.depth, self.seed
        )
    }
}

/// Derive a checkpoint file name from a log file name by substitution
/// (`<stem>.txt` → `<stem>_model.pt`). Returns `None` when the name does not
/// carry the log extension.
pub fn checkpoint_name_for_log(log_file_name: &str) -> Option<String> {
    let stem = log_file_name.strip_suffix(&format!(".{LOG_EXTENSION}"))?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}{CHECKPOINT_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hyperparams {
        Hyperparams {
            batch_size: 64,
            hidden_size: 9,
            ffn_num_layers: 2,
            depth: 2,
            seed: 0,
        }
    }

    #[test]
    fn run_stem_format() {
        assert_eq!(sample().run_stem(), "64_9_2_2_0");
    }

    #[test]
    fn log_and_checkpoint_names() {
        let params = sample();
        assert_eq!(params.log_file_name(), "64_9_2_2_0.txt");
        assert_eq!(params.checkpoint_file_name(), "64_9_2_2_0_model.pt");
    }

    #[test]
    fn checkpoint_substitution_from_log_name() {
        assert_eq!(
            checkpoint_name_for_log("16_13_3_2_0.txt").as_deref(),
            Some("16_13_3_2_0_model.pt")
        );
    }

    #[test]
    fn checkpoint_substitution_rejects_non_logs() {
        assert_eq!(checkpoint_name_for_log("16_13_3_2_0.log"), None);
        assert_eq!(checkpoint_name_for_log(".txt"), None);
    }

    #[test]
    fn serialization_roundtrip() {
        let params = sample();
        let json = serde_json::to_string(&params).unwrap();
        let back: Hyperparams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
