use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tek_core::errors::{ErrorInfo, TekError};
use tracing::info;

use crate::axes::AxisSet;
use crate::registry::{Registry, SweepPreset};
use crate::sequence::DEFAULT_INDEX_WIDTH;
use crate::serde::from_yaml_slice;
use crate::sweep::{Filter, Sweep};

/// Top-level YAML document listing named sweeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    /// Sweeps keyed by selector, in file order.
    pub sweeps: IndexMap<String, PlanSweep>,
}

/// One sweep described in a plan file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSweep {
    /// Downstream program.
    pub program: String,
    /// Arguments shared by every job.
    #[serde(default)]
    pub args: Vec<String>,
    /// Zipped axes, iterated as the outer loop.
    ///
    /// Scalars are kept as written in the file: unquoted `10e-4` or `0.70`
    /// reach the job unchanged instead of being reparsed as floats.
    #[serde(default)]
    pub parallel: IndexMap<String, Vec<String>>,
    /// Crossed axes, iterated as the inner loop.
    #[serde(default)]
    pub crossing: IndexMap<String, Vec<String>>,
    /// Predicates applied to every merged assignment.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    /// Label index width.
    #[serde(default = "PlanSweep::default_index_width")]
    pub index_width: usize,
}

impl PlanSweep {
    const fn default_index_width() -> usize {
        DEFAULT_INDEX_WIDTH
    }

    /// Builds the sweep, validating axes eagerly.
    pub fn to_sweep(&self) -> Result<Sweep, TekError> {
        let crossing = Sweep::crossing(axis_set(&self.crossing)?);
        let mut sweep = if self.parallel.is_empty() {
            crossing
        } else {
            Sweep::parallel(axis_set(&self.parallel)?)?.nest(crossing)?
        };
        for spec in &self.filters {
            sweep = sweep.filtered(spec.to_filter());
        }
        Ok(sweep)
    }
}

/// Declarative filter predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterSpec {
    /// Both axes carry the sentinel, or neither does.
    PairedSentinel {
        /// First axis of the pair.
        first: String,
        /// Second axis of the pair.
        second: String,
        /// Sentinel value.
        sentinel: String,
    },
}

impl FilterSpec {
    /// Converts the description into a runtime predicate.
    pub fn to_filter(&self) -> Filter {
        match self {
            FilterSpec::PairedSentinel {
                first,
                second,
                sentinel,
            } => Filter::paired_sentinel(first.clone(), second.clone(), sentinel.clone()),
        }
    }
}

fn axis_set(axes: &IndexMap<String, Vec<String>>) -> Result<AxisSet, TekError> {
    axes.iter()
        .try_fold(AxisSet::new(), |set, (name, values)| {
            set.with_axis(name.clone(), values.iter().map(String::as_str))
        })
}

/// Reads and parses a YAML plan file.
pub fn load_plans(path: &Path) -> Result<PlanFile, TekError> {
    let bytes = fs::read(path).map_err(|err| {
        TekError::Serde(
            ErrorInfo::new("plan-read", "failed to read plan file")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    from_yaml_slice(&bytes)
}

impl Registry {
    /// Registers every sweep of `plans`; each is built once to fail fast.
    pub fn extend_from_plans(&mut self, plans: &PlanFile) -> Result<(), TekError> {
        for (name, plan) in &plans.sweeps {
            let sweep = plan.to_sweep().map_err(|err| with_selector(err, name))?;
            let preset = SweepPreset::new(name.clone(), plan.program.clone(), move || {
                Ok(sweep.clone())
            })
            .with_fixed_args(plan.args.iter().cloned())
            .with_index_width(plan.index_width);
            self.insert(preset)?;
            info!(selector = %name, program = %plan.program, "registered plan sweep");
        }
        Ok(())
    }
}

fn with_selector(err: TekError, selector: &str) -> TekError {
    let attach = |info: &ErrorInfo| info.clone().with_context("selector", selector);
    match &err {
        TekError::Config(info) => TekError::Config(attach(info)),
        TekError::Sequence(info) => TekError::Sequence(attach(info)),
        TekError::Registry(info) => TekError::Registry(attach(info)),
        TekError::Launch(info) => TekError::Launch(attach(info)),
        TekError::Serde(info) => TekError::Serde(attach(info)),
    }
}
