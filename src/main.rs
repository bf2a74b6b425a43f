//! pkgcmp - compare npm packages side by side.

mod cli;
mod commands;
mod format;
mod hosting;
mod local;
mod packages;
mod palette;
mod registry;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `compare --json` output stays clean (controlled by RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.command.execute().await
}
