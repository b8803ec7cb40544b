use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tek_core::errors::{ErrorInfo, TekError};
use tek_core::SweepDescriptor;
use tek_exp::{to_canonical_json_bytes, RunStamp};

/// Record of how a sweep was started, written next to its job outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Sweep selector that was run.
    pub selector: String,
    /// Downstream program.
    pub program: String,
    /// Timestamp shared by every label of the run.
    pub stamp: RunStamp,
    /// Passes over the sweep.
    pub repeat: usize,
    /// Jobs skipped at the start of the sequence.
    pub skip: usize,
    /// Jobs in flight at once.
    pub jobs: usize,
    /// Threads handed to each job via `-j`.
    pub threads_per_job: usize,
    /// Arguments forwarded verbatim to every job.
    #[serde(default)]
    pub passthrough: Vec<String>,
    /// Absent for one-shot sweeps.
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// `tek-run` version that produced the run.
    pub version: String,
}

impl RunManifest {
    /// Captures the invocation before any job starts.
    pub fn new(
        selector: &str,
        program: &str,
        stamp: &RunStamp,
        descriptor: &SweepDescriptor,
        passthrough: &[String],
        fingerprint: Option<String>,
    ) -> Self {
        Self {
            selector: selector.to_string(),
            program: program.to_string(),
            stamp: stamp.clone(),
            repeat: descriptor.repeat,
            skip: descriptor.skip,
            jobs: descriptor.jobs,
            threads_per_job: descriptor.threads_per_job,
            passthrough: passthrough.to_vec(),
            fingerprint,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes `manifest_<stamp>.json` under `outdir` and returns its path.
    pub fn persist(&self, outdir: &Path) -> Result<PathBuf, TekError> {
        fs::create_dir_all(outdir).map_err(|err| write_error(outdir, err))?;
        let path = outdir.join(format!("manifest_{}.json", self.stamp.as_str()));
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(&path, bytes).map_err(|err| write_error(&path, err))?;
        Ok(path)
    }
}

fn write_error(path: &Path, err: impl ToString) -> TekError {
    TekError::Serde(
        ErrorInfo::new("manifest-write", err.to_string())
            .with_context("path", path.display().to_string()),
    )
}
