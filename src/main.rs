use anyhow::Context;
use brc_processor::cli::{run, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("brc-processor failed")
}
