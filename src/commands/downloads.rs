//! Downloads command - show the download count of a single package.

use anyhow::{Context, Result};
use clap::Args;
use reqwest::Client;

use crate::format::abbreviate_number;
use crate::local::LocalConfig;
use crate::registry::{DownloadPeriod, DownloadsClient};

#[derive(Args)]
pub struct DownloadsCmd {
    /// Package name (e.g., react, @types/node)
    pub package: String,

    /// Period to count downloads over
    #[arg(long, short = 'p', value_enum, default_value_t = DownloadPeriod::LastWeek)]
    pub period: DownloadPeriod,
}

impl DownloadsCmd {
    pub async fn run(&self) -> Result<()> {
        let config = LocalConfig::load()?;
        let client = DownloadsClient::with_api_url(
            Client::new(),
            config.downloads_url.clone(),
            config.proxy(),
        );

        let point = client
            .fetch_point(&self.package, self.period)
            .await
            .with_context(|| format!("Failed to fetch downloads for {}", self.package))?;

        println!(
            "{}: {} downloads ({}, {} to {})",
            self.package,
            abbreviate_number(point.downloads),
            self.period,
            point.start,
            point.end
        );

        Ok(())
    }
}
