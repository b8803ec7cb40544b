//! Parameter-sweep generation: axis sets, sweep composition, job sequencing
//! and the selector registry.

mod axes;
mod fingerprint;
mod plan;
mod registry;
mod sequence;
mod serde;
mod sweep;

pub use axes::{AxisSet, Crossing, Parallel};
pub use fingerprint::fingerprint;
pub use plan::{load_plans, FilterSpec, PlanFile, PlanSweep};
pub use registry::{Registry, SweepPreset};
pub use sequence::{
    label_for, render_flags, JobPrefix, JobSequence, JobSequencer, JobSpec, RunStamp,
    DEFAULT_INDEX_WIDTH,
};
pub use sweep::{Assignments, Filter, Sweep};

pub use crate::serde::to_canonical_json_bytes;
