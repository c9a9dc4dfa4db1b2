//! Undofs CLI Binary
//!
//! Reads a command script, prints one line per outcome. Rejected commands are
//! reported on stdout and never change the exit status.

use anyhow::Context;
use clap::Parser;
use std::process;
use undofs::logging::init_logging;
use undofs::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let context = CliContext::new(cli.config.clone())
        .context("loading configuration")?
        .with_format(&cli.format)?
        .with_summary(cli.summary);

    let logging = cli.logging_config(&context.config().logging);
    init_logging(Some(&logging)).context("initializing logging")?;

    let execution = context
        .execute_from_source(&cli.command)
        .context("running session")?;

    print!("{}", execution.output);
    if let Some(summary) = execution.summary {
        eprintln!("{}", summary);
    }
    Ok(())
}
