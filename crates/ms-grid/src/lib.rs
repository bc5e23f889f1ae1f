//! # ms-grid
//!
//! Hyperparameter grid enumeration and sweep planning for MolSweep.
//!
//! Everything here is pure: a [`ParamGrid`] describes the value sets, a
//! [`SweepConfig`] adds the external inputs and working directory, and
//! planning turns the two into one `JobSpec` per combination with
//! deterministic, collision-free output paths.

mod grid;
mod plan;

pub use grid::ParamGrid;
pub use plan::{plan_jobs, SweepConfig};
