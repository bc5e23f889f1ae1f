//! Sweep submission orchestration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use ms_grid::{plan_jobs, SweepConfig};
use ms_types::{JobHandle, JobSpec, MsResult, SubmitError, SweepId};

use crate::scheduler::JobScheduler;

/// One submission the scheduler rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedSubmission {
    pub job_index: usize,
    pub run_stem: String,
    pub error: String,
}

/// What happened across one sweep submission pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub sweep_id: SweepId,
    pub scheduler: String,
    pub submitted: Vec<(JobSpec, JobHandle)>,
    pub failed: Vec<FailedSubmission>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SweepReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validate inputs, create the output directories, then submit one job per
/// planned combination.
///
/// Submission continues past individual failures — cluster jobs are
/// independent, so one rejection says nothing about the rest. Every failure
/// is logged and carried in the report; callers decide whether a partial
/// sweep is fatal. There is deliberately no retry and no wait: the scheduler
/// owns job lifecycles from here on.
pub async fn run_sweep(
    config: &SweepConfig,
    scheduler: &dyn JobScheduler,
) -> MsResult<SweepReport> {
    let started_at = Utc::now();

    for input in [&config.data_path, &config.features_path] {
        if !input.is_file() {
            return Err(SubmitError::MissingInput {
                path: input.clone(),
            }
            .into());
        }
    }

    let jobs = plan_jobs(config)?;
    info!(
        sweep = %config.id,
        jobs = jobs.len(),
        scheduler = scheduler.name(),
        work_dir = %config.work_dir.display(),
        "submitting sweep"
    );

    fs::create_dir_all(&config.work_dir).await?;
    fs::create_dir_all(config.model_dir()).await?;

    let mut submitted = Vec::with_capacity(jobs.len());
    let mut failed = Vec::new();

    for job in jobs {
        match scheduler.submit_job(&job).await {
            Ok(handle) => {
                info!(
                    job = job.index,
                    stem = %job.params.run_stem(),
                    scheduler_job_id = ?handle.scheduler_job_id,
                    "submitted"
                );
                submitted.push((job, handle));
            }
            Err(e) => {
                warn!(job = job.index, stem = %job.params.run_stem(), error = %e, "submission failed");
                failed.push(FailedSubmission {
                    job_index: job.index,
                    run_stem: job.params.run_stem(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        sweep = %config.id,
        submitted = submitted.len(),
        failed = failed.len(),
        "sweep submission finished"
    );

    Ok(SweepReport {
        sweep_id: config.id,
        scheduler: scheduler.name().to_string(),
        submitted,
        failed,
        started_at,
        finished_at: Utc::now(),
    })
}
