//! Job-scheduler abstraction and the Slurm implementation.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

use ms_types::{JobHandle, JobSpec, SubmitError};

/// Result alias for scheduler operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Core scheduler interface.
///
/// Implementations may talk to a real cluster scheduler or record
/// submissions locally (see [`super::recording::RecordingScheduler`]).
/// Submission hands the job over completely: there is no status query,
/// cancellation, or completion wait — the cluster owns the job lifecycle.
#[async_trait]
pub trait JobScheduler: Send + Sync {
    /// Submit one training job. Returns the scheduler's answer.
    async fn submit_job(&self, spec: &JobSpec) -> SubmitResult<JobHandle>;

    /// Human-readable scheduler name.
    fn name(&self) -> &str;
}

/// Submits jobs to a Slurm cluster via `sbatch`.
///
/// Each submission runs `sbatch [extra_args..] <script> <nine positional
/// args>` where the positional arguments come from
/// [`JobSpec::positional_args`] — the order is fixed by the cluster-side
/// training script.
#[derive(Debug, Clone)]
pub struct SlurmScheduler {
    /// The sbatch executable (overridable for clusters with wrapped
    /// submission commands).
    pub sbatch_program: String,
    /// The batch script that runs one training job.
    pub training_script: PathBuf,
    /// Extra arguments placed before the script (partition, time limit, ...).
    pub extra_args: Vec<String>,
}

impl SlurmScheduler {
    pub fn new(training_script: impl Into<PathBuf>) -> Self {
        Self {
            sbatch_program: "sbatch".to_string(),
            training_script: training_script.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.sbatch_program = program.into();
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Parse the job id out of sbatch's stdout
    /// (`Submitted batch job 123456`).
    fn parse_job_id(stdout: &str) -> Option<u64> {
        stdout
            .lines()
            .find_map(|line| line.trim().strip_prefix("Submitted batch job "))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|id| id.parse().ok())
    }
}

#[async_trait]
impl JobScheduler for SlurmScheduler {
    async fn submit_job(&self, spec: &JobSpec) -> SubmitResult<JobHandle> {
        let mut command = Command::new(&self.sbatch_program);
        command
            .args(&self.extra_args)
            .arg(&self.training_script)
            .args(spec.positional_args());

        debug!(job = spec.index, stem = %spec.params.run_stem(), "invoking sbatch");

        let output = command
            .output()
            .await
            .map_err(|e| SubmitError::SpawnFailed {
                program: self.sbatch_program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SubmitError::NonZeroExit {
                program: self.sbatch_program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let job_id = Self::parse_job_id(&stdout);
        if job_id.is_none() {
            warn!(
                job = spec.index,
                stdout = %stdout.trim(),
                "sbatch succeeded but printed no job id"
            );
        }

        Ok(JobHandle::new(job_id))
    }

    fn name(&self) -> &str {
        "slurm"
    }
}
