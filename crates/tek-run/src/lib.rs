//! Command-line entry point composing the sweep registry, the job sequencer
//! and the launcher.
#![deny(missing_docs)]

/// Command-line surface.
pub mod cli;
/// Subscriber setup for `tracing`.
pub mod logging;
/// Run manifests written next to job outputs.
pub mod manifest;
/// Selector resolution and launch.
pub mod sweep;

pub use cli::Cli;
pub use sweep::{execute, Outcome};
