//! In-process scheduler that records submissions instead of running them.
//!
//! Stands in for the cluster during tests and `--dry-run`: every submission
//! is captured with its full argument vector so callers can inspect exactly
//! what would have reached `sbatch`.

use async_trait::async_trait;
use std::sync::Mutex;

use ms_types::{JobHandle, JobSpec};

use crate::scheduler::{JobScheduler, SubmitResult};

/// A fully in-process scheduler that accepts every submission.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    // Mutex only because the trait takes &self; nothing runs concurrently.
    submissions: Mutex<Vec<JobSpec>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<JobSpec> {
        self.submissions.lock().expect("recording lock").clone()
    }

    pub fn len(&self) -> usize {
        self.submissions.lock().expect("recording lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JobScheduler for RecordingScheduler {
    async fn submit_job(&self, spec: &JobSpec) -> SubmitResult<JobHandle> {
        let mut submissions = self.submissions.lock().expect("recording lock");
        submissions.push(spec.clone());
        // Fake sequential job ids so reports look like real ones.
        Ok(JobHandle::new(Some(submissions.len() as u64)))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_grid::{plan_jobs, SweepConfig};

    #[tokio::test]
    async fn records_in_submission_order() {
        let config = SweepConfig::new("train.csv", "features.npz", "work");
        let jobs = plan_jobs(&config).unwrap();

        let scheduler = RecordingScheduler::new();
        for job in &jobs {
            let handle = scheduler.submit_job(job).await.unwrap();
            assert!(handle.scheduler_job_id.is_some());
        }

        let recorded = scheduler.submissions();
        assert_eq!(recorded.len(), jobs.len());
        assert_eq!(recorded[0].params.run_stem(), "64_9_2_2_0");
        assert_eq!(recorded.last().unwrap().index, jobs.len() - 1);
    }
}
