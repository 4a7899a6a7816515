//! Merkleroot CLI Binary
//!
//! Command-line interface for deterministic Merkle root computation.

use anyhow::Context;
use clap::Parser;
use merkleroot::logging::init_logging;
use merkleroot::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli).context("Error loading configuration")?;
    init_logging(Some(&context.config().logging), cli.log_file.clone())
        .context("Error initializing logging")?;
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
