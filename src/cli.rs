//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{CompareCmd, ConfigCmd, DownloadsCmd};

#[derive(Parser)]
#[command(name = "pkgcmp")]
#[command(about = "pkgcmp - compare npm packages side by side")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch registry, GitHub and download stats for packages
    Compare(CompareCmd),

    /// Show the download count of a single package
    Downloads(DownloadsCmd),

    /// Manage configuration (proxy, GitHub token, etc.)
    Config(ConfigCmd),
}

impl Command {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self {
            Command::Compare(cmd) => cmd.run().await,
            Command::Downloads(cmd) => cmd.run().await,
            Command::Config(cmd) => cmd.run().await,
        }
    }
}
