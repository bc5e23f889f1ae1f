//! `ms-sweep-submit` — submit one cluster training job per grid combination.

use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ms_grid::SweepConfig;
use ms_sweep::{run_sweep, JobScheduler, SlurmScheduler};

#[derive(Debug, Parser)]
#[command(name = "ms-sweep-submit", about = "Submit a hyperparameter grid sweep")]
struct Args {
    /// Training data CSV passed through to every job
    data_path: PathBuf,

    /// Molecular features file passed through to every job
    features_path: PathBuf,

    /// Directory for result logs; checkpoints land in <work_dir>/model
    work_dir: PathBuf,

    /// Number of grid repeats (the repeat index becomes the seed)
    #[arg(long, default_value_t = 1)]
    repeats: u32,

    /// Batch script that runs one training job
    #[arg(long, default_value = "train_one.sh")]
    script: PathBuf,

    /// Submission program (override for wrapped sbatch commands)
    #[arg(long, default_value = "sbatch")]
    sbatch: String,

    /// Extra argument placed before the script (repeatable)
    #[arg(long = "scheduler-arg")]
    scheduler_args: Vec<String>,

    /// Plan and print the submissions without calling the scheduler
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = SweepConfig::new(args.data_path, args.features_path, args.work_dir)
        .with_repeats(args.repeats);

    if args.dry_run {
        // Plan only: no directories created, no scheduler involved.
        for spec in ms_grid::plan_jobs(&config)? {
            let mut line = vec![args.sbatch.clone()];
            line.extend(args.scheduler_args.iter().cloned());
            line.push(args.script.display().to_string());
            line.extend(spec.positional_args());
            println!("{}", line.join(" "));
        }
        return Ok(());
    }

    let scheduler: Box<dyn JobScheduler> = Box::new(
        SlurmScheduler::new(args.script)
            .with_program(args.sbatch)
            .with_extra_args(args.scheduler_args),
    );

    let report = run_sweep(&config, scheduler.as_ref()).await?;
    println!(
        "sweep {}: {} submitted, {} failed",
        report.sweep_id,
        report.submitted.len(),
        report.failed.len()
    );

    if !report.all_succeeded() {
        for failure in &report.failed {
            eprintln!("job {} ({}): {}", failure.job_index, failure.run_stem, failure.error);
        }
        bail!("{} of {} submissions failed", report.failed.len(), report.submitted.len() + report.failed.len());
    }

    Ok(())
}
