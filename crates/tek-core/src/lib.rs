#![deny(missing_docs)]
#![doc = "Shared vocabulary for the tek parameter-sweep runner: errors, axis values, assignments and the sweep descriptor."]

mod assignment;
mod descriptor;
pub mod errors;
mod value;

pub use assignment::Assignment;
pub use descriptor::SweepDescriptor;
pub use errors::{ErrorInfo, TekError};
pub use value::AxisValue;
