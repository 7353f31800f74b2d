//! Metatree CLI Binary
//!
//! Command-line interface for building metadata catalogs.

use anyhow::Context;
use clap::Parser;
use metatree::logging;
use metatree::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.project.clone(), cli.config.clone())
        .with_context(|| format!("initializing project {}", cli.project.display()))?;

    let logging_config = cli.logging_config(context.config());
    logging::init_logging(Some(&logging_config)).context("initializing logging")?;

    let output = context.execute(&cli.command)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
