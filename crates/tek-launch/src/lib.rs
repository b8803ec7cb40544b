#![deny(missing_docs)]
#![doc = "Executes tek job sequences with bounded concurrency, or prints them in dry-run mode."]

/// Pool-based dispatch of job sequences.
pub mod dispatch;
/// Per-job execution strategies.
pub mod runner;

pub use dispatch::{available_units, launch, launch_to, LaunchOpts, LaunchSummary};
pub use runner::{JobOutcome, JobRunner, ProcessRunner};
