//! Strata CLI binary entry point.

use anyhow::Result;
use clap::Parser;
use strata_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_tracing();
    cli.run()
}
