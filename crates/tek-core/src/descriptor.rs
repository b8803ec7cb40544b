use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Process-wide sweep settings, fixed once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepDescriptor {
    /// Jobs in flight at once.
    #[serde(default = "SweepDescriptor::default_jobs")]
    pub jobs: usize,
    /// Threads handed to each job through its `-j` flag.
    #[serde(default = "SweepDescriptor::default_threads_per_job")]
    pub threads_per_job: usize,
    /// Number of end-to-end passes over the sweep.
    #[serde(default = "SweepDescriptor::default_repeat")]
    pub repeat: usize,
    /// Global job indices below this value are discarded.
    #[serde(default)]
    pub skip: usize,
    /// Print jobs instead of executing them.
    #[serde(default)]
    pub dry_run: bool,
    /// Root directory for job outputs.
    #[serde(default = "SweepDescriptor::default_outdir")]
    pub outdir: PathBuf,
}

impl SweepDescriptor {
    const fn default_jobs() -> usize {
        1
    }

    const fn default_threads_per_job() -> usize {
        1
    }

    const fn default_repeat() -> usize {
        1
    }

    fn default_outdir() -> PathBuf {
        PathBuf::from(".stdout")
    }
}

impl Default for SweepDescriptor {
    fn default() -> Self {
        Self {
            jobs: Self::default_jobs(),
            threads_per_job: Self::default_threads_per_job(),
            repeat: Self::default_repeat(),
            skip: 0,
            dry_run: false,
            outdir: Self::default_outdir(),
        }
    }
}
