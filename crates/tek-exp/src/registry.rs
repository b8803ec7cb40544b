use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tek_core::errors::{ErrorInfo, TekError};
use tek_core::Assignment;

use crate::axes::AxisSet;
use crate::sequence::DEFAULT_INDEX_WIDTH;
use crate::sweep::{Filter, Sweep};

type Builder = dyn Fn() -> Result<Sweep, TekError> + Send + Sync;

/// Named sweep together with the program it drives.
#[derive(Clone)]
pub struct SweepPreset {
    /// Selector used on the command line.
    pub name: String,
    /// Downstream program.
    pub program: String,
    /// Arguments placed after `-j` for every job.
    pub fixed_args: Vec<String>,
    /// Zero-padding width of label indices.
    pub index_width: usize,
    build: Arc<Builder>,
}

impl SweepPreset {
    /// Preset whose sweep is produced by `build` on demand.
    pub fn new<F>(name: impl Into<String>, program: impl Into<String>, build: F) -> Self
    where
        F: Fn() -> Result<Sweep, TekError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            program: program.into(),
            fixed_args: Vec::new(),
            index_width: DEFAULT_INDEX_WIDTH,
            build: Arc::new(build),
        }
    }

    /// Adds arguments shared by every job of this preset.
    pub fn with_fixed_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fixed_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the label index width.
    pub fn with_index_width(mut self, width: usize) -> Self {
        self.index_width = width;
        self
    }

    /// Builds the sweep.
    pub fn sweep(&self) -> Result<Sweep, TekError> {
        (self.build)()
    }
}

impl fmt::Debug for SweepPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepPreset")
            .field("name", &self.name)
            .field("program", &self.program)
            .field("fixed_args", &self.fixed_args)
            .field("index_width", &self.index_width)
            .finish()
    }
}

/// Explicit selector → preset mapping, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    presets: IndexMap<String, SweepPreset>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in sweep.
    pub fn builtin() -> Self {
        let mut presets = IndexMap::new();
        for preset in builtin_presets() {
            presets.insert(preset.name.clone(), preset);
        }
        Self { presets }
    }

    /// Registers `preset`; selectors must be unique.
    pub fn insert(&mut self, preset: SweepPreset) -> Result<(), TekError> {
        if self.presets.contains_key(&preset.name) {
            return Err(TekError::Registry(
                ErrorInfo::new("duplicate-sweep", "sweep selector already registered")
                    .with_context("selector", preset.name),
            ));
        }
        self.presets.insert(preset.name.clone(), preset);
        Ok(())
    }

    /// Looks up a selector.
    pub fn get(&self, name: &str) -> Result<&SweepPreset, TekError> {
        self.presets.get(name).ok_or_else(|| {
            TekError::Registry(
                ErrorInfo::new("unknown-sweep", "no sweep registered under this selector")
                    .with_context("selector", name)
                    .with_context("valid", self.names().collect::<Vec<_>>().join(",")),
            )
        })
    }

    /// Selectors in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

fn builtin_presets() -> Vec<SweepPreset> {
    vec![
        SweepPreset::new("te2fig1", "tek2", te2fig1),
        SweepPreset::new("te2fig2", "tek2", te2fig2),
        SweepPreset::new("te2fig4", "tek2", || Ok(te2fig4())),
        SweepPreset::new("te2fig5", "tek2", te2fig5),
        SweepPreset::new("te2fig6", "tek2", te2fig6),
        SweepPreset::new("te1fig2s", "tek2", te1fig2s),
        SweepPreset::new("speciation", "tek", speciation)
            .with_fixed_args(["-r7"])
            .with_index_width(2),
        SweepPreset::new("speciation-spec", "tek", speciation_spec)
            .with_fixed_args(["-r7"])
            .with_index_width(2),
    ]
}

fn te2fig1() -> Result<Sweep, TekError> {
    let axes = AxisSet::new()
        .with_axis("n", ["1000"])?
        .with_axis("xi", ["10e-4", "5e-4", "1e-4"])?
        .with_axis("g", ["50000"])?
        .with_axis("i", ["100"])?;
    Ok(Sweep::crossing(axes))
}

fn te2fig2() -> Result<Sweep, TekError> {
    let axes = AxisSet::new()
        .with_axis("n", ["1000"])?
        .with_axis("xi", ["10e-4"])?
        .with_axis("g", ["50000"])?
        .with_axis("i", ["100"])?;
    Ok(Sweep::crossing(axes))
}

fn te2fig4() -> Sweep {
    Sweep::listed(vec![Assignment::new()
        .with("n", "1000")
        .with("xi", "10e-4")
        .with("g", "6000")
        .with("H", "4000")
        .with("i", "20")])
}

fn te2fig5() -> Result<Sweep, TekError> {
    let axes = AxisSet::new()
        .with_axis("n", ["1000"])?
        .with_axis("xi", ["10e-4"])?
        .with_axis("coexist", ["2"])?
        .with_axis("lower", ["6", "9"])?
        .with_axis("upper", ["18", "24", "30"])?
        .with_axis("g", ["50000"])?
        .with_axis("i", ["100"])?;
    Ok(Sweep::crossing(axes))
}

fn te2fig6() -> Result<Sweep, TekError> {
    let axes = AxisSet::new()
        .with_axis("r", ["1"])?
        .with_axis("n", ["1000"])?
        .with_axis("xi", ["10e-4"])?
        .with_axis("coexist", ["2", "5", "8"])?
        .with_axis("lower", ["6", "9"])?
        .with_axis("upper", ["18", "24", "30"])?
        .with_axis("g", ["50000"])?
        .with_axis("i", ["100"])?;
    Ok(Sweep::crossing(axes))
}

fn te1fig2s() -> Result<Sweep, TekError> {
    let paired = AxisSet::new()
        .with_axis("alpha", ["0.70", "0.75", "0.80", "0.85"])?
        .with_axis("beta", [6, 12, 24, 48])?;
    let crossed = AxisSet::new()
        .with_axis("xi", ["1e-5", "1e-4", "1e-3"])?
        .with_axis("lambda", ["1e-4", "1e-3"])?
        .with_axis("nu", ["0", "1e-6", "1e-4"])?;
    Sweep::parallel(paired)?.nest(Sweep::crossing(crossed))
}

fn speciation() -> Result<Sweep, TekError> {
    let axes = AxisSet::new()
        .with_axis("xi", ["10e-4"])?
        .with_axis("lower", ["6", "9", "12", "300"])?
        .with_axis("upper", ["18", "24", "30", "300"])?;
    Ok(Sweep::crossing(axes).filtered(Filter::paired_sentinel("lower", "upper", "300")))
}

fn speciation_spec() -> Result<Sweep, TekError> {
    let axes = AxisSet::new()
        .with_axis("xi", ["1e-4", "5e-4"])?
        .with_axis("spec", ["1e-4", "1e-3"])?;
    Ok(Sweep::crossing(axes))
}
