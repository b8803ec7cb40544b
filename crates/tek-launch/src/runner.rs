use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tek_core::errors::{ErrorInfo, TekError};
use tek_exp::JobSpec;

fn io_error(code: &str, path: &Path, err: impl ToString) -> TekError {
    TekError::Launch(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Result of running a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    /// Exit status zero.
    Succeeded,
    /// Non-zero exit; `code` is absent when the process was killed by a signal.
    Failed {
        /// Process exit code.
        code: Option<i32>,
    },
}

/// Executes one job. Implementations must be shareable across pool threads.
pub trait JobRunner: Sync {
    /// Runs `job` with outputs rooted at `outdir`.
    fn run(&self, job: &JobSpec, outdir: &Path) -> Result<JobOutcome, TekError>;
}

/// Spawns each job as a child process.
///
/// The child runs with `outdir` as its working directory, so the relative
/// `--outdir=<label>` argument lands in `outdir/<label>`. Standard streams are
/// captured to `stdout.txt` and `stderr.txt` inside that directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl JobRunner for ProcessRunner {
    fn run(&self, job: &JobSpec, outdir: &Path) -> Result<JobOutcome, TekError> {
        let (program, args) = job.args.split_first().ok_or_else(|| {
            TekError::Launch(
                ErrorInfo::new("empty-command", "job has no program")
                    .with_context("label", job.label.clone()),
            )
        })?;
        let job_dir = outdir.join(&job.label);
        fs::create_dir_all(&job_dir).map_err(|err| io_error("job-dir", &job_dir, err))?;
        let stdout_path = job_dir.join("stdout.txt");
        let stderr_path = job_dir.join("stderr.txt");
        let stdout =
            File::create(&stdout_path).map_err(|err| io_error("job-stdout", &stdout_path, err))?;
        let stderr =
            File::create(&stderr_path).map_err(|err| io_error("job-stderr", &stderr_path, err))?;

        let status = Command::new(program)
            .args(args)
            .current_dir(outdir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|err| {
                TekError::Launch(
                    ErrorInfo::new("spawn", err.to_string())
                        .with_context("program", program.clone())
                        .with_context("label", job.label.clone()),
                )
            })?;
        if status.success() {
            Ok(JobOutcome::Succeeded)
        } else {
            Ok(JobOutcome::Failed {
                code: status.code(),
            })
        }
    }
}
