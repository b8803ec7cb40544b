use chrono::Local;
use serde::{Deserialize, Serialize};
use tek_core::errors::{ErrorInfo, TekError};
use tek_core::Assignment;
use tracing::{debug, info};

use crate::sweep::{Assignments, Sweep};

/// Zero-padding width of the index component in labels.
pub const DEFAULT_INDEX_WIDTH: usize = 3;

/// Sweep-start timestamp shared by every job of one sequencer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStamp(String);

impl RunStamp {
    /// Captures the local wall clock.
    pub fn now() -> Self {
        Self(Local::now().format("%Y%m%d_%H%M%S").to_string())
    }

    /// Uses a caller supplied stamp.
    pub fn fixed(stamp: impl Into<String>) -> Self {
        Self(stamp.into())
    }

    /// Stamp text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Constant leading arguments shared by every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPrefix {
    /// Downstream program name.
    pub program: String,
    /// Value forwarded through `-j`.
    pub threads_per_job: usize,
    /// Arguments fixed by the sweep definition.
    #[serde(default)]
    pub fixed_args: Vec<String>,
    /// Unrecognised runner arguments forwarded verbatim.
    #[serde(default)]
    pub passthrough: Vec<String>,
}

impl JobPrefix {
    /// Prefix running `program` with one thread per job.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            threads_per_job: 1,
            fixed_args: Vec::new(),
            passthrough: Vec::new(),
        }
    }

    /// Renders `[program, -j<threads>, fixed..., passthrough...]`.
    pub fn render(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(2 + self.fixed_args.len() + self.passthrough.len());
        args.push(self.program.clone());
        args.push(format!("-j{}", self.threads_per_job));
        args.extend(self.fixed_args.iter().cloned());
        args.extend(self.passthrough.iter().cloned());
        args
    }
}

/// Fully rendered job ready for the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Global index within the repeated sequence.
    pub index: usize,
    /// Program name followed by its arguments.
    pub args: Vec<String>,
    /// Output label, unique within the run.
    pub label: String,
}

impl JobSpec {
    /// Space separated command line.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Encodes an assignment as flags: `-kV` for one-letter axes, `--key=V` otherwise.
pub fn render_flags(assignment: &Assignment) -> Vec<String> {
    assignment
        .iter()
        .map(|(name, value)| {
            if name.chars().count() == 1 {
                format!("-{name}{value}")
            } else {
                format!("--{name}={value}")
            }
        })
        .collect()
}

/// Builds `<flags>_<stamp>_<index>` where flags lose their dashes and `=`.
pub fn label_for(flags: &[String], stamp: &RunStamp, index: usize, width: usize) -> String {
    let joined = flags
        .iter()
        .map(|flag| flag.trim_start_matches('-').replace('=', ""))
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "-");
    let index = format!("{index:0width$}");
    if joined.is_empty() {
        format!("{}_{index}", stamp.as_str())
    } else {
        format!("{joined}_{}_{index}", stamp.as_str())
    }
}

/// Turns a sweep into a repeated, skip-adjusted stream of [`JobSpec`].
#[derive(Debug, Clone)]
pub struct JobSequencer {
    sweep: Sweep,
    prefix: JobPrefix,
    repeat: usize,
    skip: usize,
    stamp: RunStamp,
    index_width: usize,
}

impl JobSequencer {
    /// Validates `repeat` against the sweep before any job is produced.
    pub fn new(
        sweep: Sweep,
        prefix: JobPrefix,
        repeat: usize,
        skip: usize,
        stamp: RunStamp,
    ) -> Result<Self, TekError> {
        if repeat == 0 {
            return Err(TekError::Config(
                ErrorInfo::new("zero-repeat", "repeat must be at least 1")
                    .with_context("repeat", "0"),
            ));
        }
        if repeat > 1 && !sweep.is_restartable() {
            return Err(TekError::Sequence(
                ErrorInfo::new("repeat-one-shot", "a one-shot sweep cannot be repeated")
                    .with_context("repeat", repeat.to_string())
                    .with_hint("use --repeat 1 or define the sweep from axis sets"),
            ));
        }
        Ok(Self {
            sweep,
            prefix,
            repeat,
            skip,
            stamp,
            index_width: DEFAULT_INDEX_WIDTH,
        })
    }

    /// Overrides the zero-padding width of the index component.
    pub fn with_index_width(mut self, width: usize) -> Self {
        self.index_width = width;
        self
    }

    /// Timestamp shared by all labels of this run.
    pub fn stamp(&self) -> &RunStamp {
        &self.stamp
    }

    /// Starts the lazy job stream.
    pub fn jobs(&self) -> JobSequence {
        info!(
            program = %self.prefix.program,
            repeat = self.repeat,
            skip = self.skip,
            stamp = self.stamp.as_str(),
            "starting job sequence"
        );
        JobSequence {
            sweep: self.sweep.clone(),
            prefix: self.prefix.render(),
            stamp: self.stamp.clone(),
            index_width: self.index_width,
            passes_left: self.repeat - 1,
            skip: self.skip,
            current: Some(self.sweep.iter()),
            index: 0,
        }
    }
}

/// Lazy iterator produced by [`JobSequencer::jobs`].
pub struct JobSequence {
    sweep: Sweep,
    prefix: Vec<String>,
    stamp: RunStamp,
    index_width: usize,
    passes_left: usize,
    skip: usize,
    current: Option<Assignments>,
    index: usize,
}

impl JobSequence {
    fn next_assignment(&mut self) -> Option<Assignment> {
        loop {
            let pass = self.current.as_mut()?;
            if let Some(assignment) = pass.next() {
                return Some(assignment);
            }
            if self.passes_left == 0 {
                self.current = None;
                return None;
            }
            self.passes_left -= 1;
            self.current = Some(self.sweep.iter());
        }
    }

    fn build(&self, index: usize, assignment: &Assignment) -> JobSpec {
        let flags = render_flags(assignment);
        let label = label_for(&flags, &self.stamp, index, self.index_width);
        let mut args = Vec::with_capacity(self.prefix.len() + flags.len() + 1);
        args.extend(self.prefix.iter().cloned());
        args.extend(flags);
        args.push(format!("--outdir={label}"));
        JobSpec { index, args, label }
    }
}

impl Iterator for JobSequence {
    type Item = JobSpec;

    fn next(&mut self) -> Option<JobSpec> {
        loop {
            let assignment = self.next_assignment()?;
            let index = self.index;
            self.index += 1;
            if index < self.skip {
                continue;
            }
            if index == self.skip && index > 0 {
                debug!(skipped = index, "resuming after skipped jobs");
            }
            return Some(self.build(index, &assignment));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_axis_names_render_differently() {
        let assignment = Assignment::new().with("n", "1000").with("lambda", "1e-4");
        assert_eq!(render_flags(&assignment), vec!["-n1000", "--lambda=1e-4"]);
    }

    #[test]
    fn label_orders_flags_stamp_index() {
        let flags = vec!["-n1000".to_string(), "--xi=10e-4".to_string()];
        let stamp = RunStamp::fixed("20240101_120000");
        assert_eq!(
            label_for(&flags, &stamp, 7, 3),
            "n1000_xi10e-4_20240101_120000_007"
        );
    }

    #[test]
    fn empty_flags_omit_leading_component() {
        let stamp = RunStamp::fixed("S");
        assert_eq!(label_for(&[], &stamp, 12, 2), "S_12");
    }

    #[test]
    fn path_separators_do_not_escape_the_label() {
        let flags = vec!["--input=data/a.txt".to_string()];
        let label = label_for(&flags, &RunStamp::fixed("S"), 0, 3);
        assert!(!label.contains('/'));
    }

    #[test]
    fn prefix_renders_threads_flag() {
        let prefix = JobPrefix {
            program: "tek".into(),
            threads_per_job: 4,
            fixed_args: vec!["-r7".into()],
            passthrough: vec!["-v".into()],
        };
        assert_eq!(prefix.render(), vec!["tek", "-j4", "-r7", "-v"]);
    }
}
