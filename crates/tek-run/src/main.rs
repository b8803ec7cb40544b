use std::error::Error;

use clap::Parser;
use tek_launch::ProcessRunner;
use tek_run::logging::init_logging;
use tek_run::{execute, Cli};
use tracing::error;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;
    execute(&cli, &ProcessRunner).map_err(|err| {
        error!(code = %err.info().code, "run aborted");
        err
    })?;
    Ok(())
}
