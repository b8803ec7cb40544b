use std::path::PathBuf;

use clap::Parser;

/// Runner options. Everything after SELECTOR is forwarded to every job.
#[derive(Parser, Debug)]
#[command(
    name = "tek-run",
    about = "Generate and launch parameter-sweep jobs for tek simulations"
)]
pub struct Cli {
    /// Registered sweep to run (see --list).
    #[arg(required_unless_present = "list")]
    pub selector: Option<String>,
    /// Discard the first N jobs of the (repeated) sequence.
    #[arg(long, default_value_t = 0)]
    pub skip: usize,
    /// Root directory for job outputs.
    #[arg(short = 'o', long, default_value = ".stdout")]
    pub outdir: PathBuf,
    /// Run the whole sweep this many times end to end.
    #[arg(short = 'r', long, default_value_t = 1)]
    pub repeat: usize,
    /// Jobs in flight at once; defaults to the number of execution units.
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,
    /// Threads per job, forwarded as `-j<N>`.
    #[arg(short = 'p', long, default_value_t = 1)]
    pub parallel: usize,
    /// Print the generated command lines without executing them.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
    /// YAML file defining additional sweeps.
    #[arg(long, value_name = "PATH")]
    pub plans: Option<PathBuf>,
    /// List registered selectors and exit.
    #[arg(long)]
    pub list: bool,
    /// Log filter directive; overrides TEK_LOG.
    #[arg(long)]
    pub log_level: Option<String>,
    /// Arguments passed through verbatim to each job.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub rest: Vec<String>,
}
