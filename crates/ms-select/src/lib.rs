//! # ms-select
//!
//! The post-training half of MolSweep: once the cluster jobs have written
//! their result logs, scan the log directory, pick the best-scoring run,
//! run the external prediction command with its checkpoint, and score the
//! predictions against the held-out truth.

pub mod logs;
pub mod metrics;
pub mod pipeline;
pub mod predict;
pub mod select;

pub use logs::{read_score, scan_logs};
pub use metrics::{compute_metrics, read_target_column, GroupReport, RangeGroup, ScoreReport};
pub use pipeline::{run_selection, SelectionConfig};
pub use predict::{CommandPredictor, PredictResult, Predictor, StubPredictor};
pub use select::{resolve_checkpoint, select_best, BestRun};
