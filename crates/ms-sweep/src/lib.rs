//! # ms-sweep
//!
//! Submits one cluster training job per planned grid combination.
//!
//! The scheduler is an external collaborator behind the [`JobScheduler`]
//! trait: [`SlurmScheduler`] shells out to `sbatch`, while
//! [`RecordingScheduler`] stays in-process for tests and dry runs. The
//! orchestrator itself is sequential and never waits on job completion.

pub mod recording;
pub mod scheduler;
pub mod submit;

pub use recording::RecordingScheduler;
pub use scheduler::{JobScheduler, SlurmScheduler, SubmitResult};
pub use submit::{run_sweep, FailedSubmission, SweepReport};
