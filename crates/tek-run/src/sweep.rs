use tek_core::errors::{ErrorInfo, TekError};
use tek_core::SweepDescriptor;
use tek_exp::{fingerprint, load_plans, JobPrefix, JobSequencer, Registry, RunStamp};
use tek_launch::{available_units, launch, JobRunner, LaunchOpts, LaunchSummary};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::manifest::RunManifest;

/// What a CLI invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--list` printed the registered selectors.
    Listed(Vec<String>),
    /// A sweep was generated and handed to the launcher.
    Launched(LaunchSummary),
}

/// Builds the descriptor for this invocation.
pub fn descriptor(cli: &Cli) -> SweepDescriptor {
    SweepDescriptor {
        jobs: cli.jobs.unwrap_or_else(available_units),
        threads_per_job: cli.parallel,
        repeat: cli.repeat,
        skip: cli.skip,
        dry_run: cli.dry_run,
        outdir: cli.outdir.clone(),
    }
}

/// Loads the registry, resolves the selector and launches its jobs.
pub fn execute<R: JobRunner>(cli: &Cli, runner: &R) -> Result<Outcome, TekError> {
    let mut registry = Registry::builtin();
    if let Some(path) = &cli.plans {
        let plans = load_plans(path)?;
        registry.extend_from_plans(&plans)?;
    }
    if cli.list {
        let names: Vec<String> = registry.names().map(str::to_string).collect();
        for name in &names {
            println!("{name}");
        }
        return Ok(Outcome::Listed(names));
    }
    let selector = cli.selector.as_deref().ok_or_else(|| {
        TekError::Registry(ErrorInfo::new("missing-selector", "no sweep selector given"))
    })?;
    let preset = registry.get(selector)?;
    let descriptor = descriptor(cli);

    println!("cpu_count(): {}", available_units());
    println!(
        "{} jobs * {} threads/job",
        descriptor.jobs, descriptor.threads_per_job
    );

    let sweep = preset.sweep()?;
    let sweep_fingerprint = if sweep.is_restartable() {
        Some(fingerprint(&sweep)?)
    } else {
        warn!(selector, "one-shot sweep; resume fingerprint unavailable");
        None
    };
    if let Some(fp) = &sweep_fingerprint {
        info!(selector, fingerprint = %fp, "sweep fingerprint");
    }

    let prefix = JobPrefix {
        program: preset.program.clone(),
        threads_per_job: descriptor.threads_per_job,
        fixed_args: preset.fixed_args.clone(),
        passthrough: cli.rest.clone(),
    };
    let sequencer = JobSequencer::new(
        sweep,
        prefix,
        descriptor.repeat,
        descriptor.skip,
        RunStamp::now(),
    )?
    .with_index_width(preset.index_width);

    if !descriptor.dry_run {
        let manifest = RunManifest::new(
            selector,
            &preset.program,
            sequencer.stamp(),
            &descriptor,
            &cli.rest,
            sweep_fingerprint,
        );
        let path = manifest.persist(&descriptor.outdir)?;
        info!(path = %path.display(), "run manifest written");
    }

    let summary = launch(sequencer.jobs(), &LaunchOpts::from(&descriptor), runner)?;
    if summary.failed > 0 {
        warn!(failed = summary.failed, "some jobs failed");
    }
    println!(
        "End of tek-run: {} jobs, {} failed",
        summary.total, summary.failed
    );
    Ok(Outcome::Launched(summary))
}
