use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::iter::{ParallelBridge, ParallelIterator};
use serde::{Deserialize, Serialize};
use tek_core::errors::{ErrorInfo, TekError};
use tek_core::SweepDescriptor;
use tek_exp::JobSpec;
use tracing::{debug, info, warn};

use crate::runner::{JobOutcome, JobRunner};

fn launch_error(code: &str, err: impl ToString) -> TekError {
    TekError::Launch(ErrorInfo::new(code, err.to_string()))
}

/// Options governing job execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOpts {
    /// Jobs in flight at once.
    pub concurrency: usize,
    /// Print command lines instead of executing them.
    pub dry_run: bool,
    /// Root for per-job output directories.
    pub outdir: PathBuf,
}

impl Default for LaunchOpts {
    fn default() -> Self {
        Self::from(&SweepDescriptor::default())
    }
}

impl From<&SweepDescriptor> for LaunchOpts {
    fn from(descriptor: &SweepDescriptor) -> Self {
        Self {
            concurrency: descriptor.jobs,
            dry_run: descriptor.dry_run,
            outdir: descriptor.outdir.clone(),
        }
    }
}

/// Counts reported once every job has been pulled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchSummary {
    /// Jobs pulled from the sequence.
    pub total: usize,
    /// Jobs that exited successfully.
    pub succeeded: usize,
    /// Jobs that failed to spawn or exited non-zero.
    pub failed: usize,
    /// Whether the run only printed jobs.
    pub dry_run: bool,
}

/// Number of execution units available to this process.
pub fn available_units() -> usize {
    std::thread::available_parallelism()
        .map(|units| units.get())
        .unwrap_or(1)
}

/// Runs every job of `jobs` with at most `opts.concurrency` in flight.
///
/// Jobs are pulled lazily, so only the in-flight window is materialised.
/// Failing jobs are logged and counted; the remaining jobs still run.
/// Dry-run listings go to stdout.
pub fn launch<I, R>(jobs: I, opts: &LaunchOpts, runner: &R) -> Result<LaunchSummary, TekError>
where
    I: Iterator<Item = JobSpec> + Send,
    R: JobRunner,
{
    launch_to(jobs, opts, runner, &mut io::stdout())
}

/// Same as [`launch`], with the dry-run listing written to `listing`.
pub fn launch_to<I, R, W>(
    jobs: I,
    opts: &LaunchOpts,
    runner: &R,
    listing: &mut W,
) -> Result<LaunchSummary, TekError>
where
    I: Iterator<Item = JobSpec> + Send,
    R: JobRunner,
    W: Write,
{
    if opts.dry_run {
        let mut total = 0;
        for job in jobs {
            writeln!(listing, "{}", job.command_line())
                .map_err(|err| launch_error("dry-run-write", err))?;
            total += 1;
        }
        listing.flush().map_err(|err| launch_error("dry-run-write", err))?;
        info!(total, "dry run finished");
        return Ok(LaunchSummary {
            total,
            dry_run: true,
            ..LaunchSummary::default()
        });
    }

    fs::create_dir_all(&opts.outdir).map_err(|err| {
        TekError::Launch(
            ErrorInfo::new("output-root", err.to_string())
                .with_context("path", opts.outdir.display().to_string()),
        )
    })?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency.max(1))
        .build()
        .map_err(|err| launch_error("thread-pool", err))?;

    let total = AtomicUsize::new(0);
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    pool.install(|| {
        jobs.par_bridge().for_each(|job| {
            total.fetch_add(1, Ordering::Relaxed);
            if run_one(runner, &job, &opts.outdir) {
                succeeded.fetch_add(1, Ordering::Relaxed);
            } else {
                failed.fetch_add(1, Ordering::Relaxed);
            }
        })
    });

    let summary = LaunchSummary {
        total: total.into_inner(),
        succeeded: succeeded.into_inner(),
        failed: failed.into_inner(),
        dry_run: false,
    };
    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "launch finished"
    );
    Ok(summary)
}

fn run_one<R: JobRunner>(runner: &R, job: &JobSpec, outdir: &Path) -> bool {
    debug!(index = job.index, label = %job.label, "starting job");
    match runner.run(job, outdir) {
        Ok(JobOutcome::Succeeded) => {
            debug!(index = job.index, label = %job.label, "job succeeded");
            true
        }
        Ok(JobOutcome::Failed { code }) => {
            warn!(index = job.index, label = %job.label, ?code, "job exited with failure");
            false
        }
        Err(err) => {
            warn!(index = job.index, label = %job.label, error = %err, "job could not run");
            false
        }
    }
}
