//! Compare command - fetch and show metadata for a list of packages.

use anyhow::{Context, Result};
use clap::Args;

use crate::format::abbreviate_number;
use crate::local::{LAST_PACKAGES_KEY, LocalConfig, StateStore};
use crate::packages::{AggregateResult, PackageAggregator, ValidPackage};
use crate::registry::HttpSource;

#[derive(Args)]
pub struct CompareCmd {
    /// Package names (e.g., react vue @angular/core). Defaults to the last list compared.
    pub packages: Vec<String>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of packages to fetch concurrently (default: all at once)
    #[arg(long, short = 'j')]
    pub concurrency: Option<usize>,
}

impl CompareCmd {
    pub async fn run(&self) -> Result<()> {
        let config = LocalConfig::load()?;
        let state = StateStore::open_default()?;

        let packages = packages_to_compare(&state, &self.packages)?;

        if packages.is_empty() {
            println!("No packages given. Usage: pkgcmp compare <name>...");
            return Ok(());
        }

        let source = HttpSource::from_config(&config).context("Failed to build HTTP client")?;
        let aggregator = PackageAggregator::new(source, config.palette.clone())
            .with_github_api_url(config.github_api_url.clone())
            .with_concurrency(self.concurrency.or(config.concurrency));

        let result = aggregator.fetch_packages(Some(packages.as_slice())).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_result(&result);
        }

        Ok(())
    }
}

/// Names given on the command line replace the remembered list; no names
/// means "compare the last list again".
fn packages_to_compare(state: &StateStore, requested: &[String]) -> Result<Vec<String>> {
    state
        .update(LAST_PACKAGES_KEY, Vec::new(), |last| {
            if requested.is_empty() {
                last
            } else {
                requested.to_vec()
            }
        })
        .context("Failed to remember package list")
}

fn print_result(result: &AggregateResult) {
    for package in &result.valid_packages {
        println!("{}", summary_line(package));
    }

    for name in &result.invalid_packages {
        println!("could not load `{}`", name);
    }

    if !result.invalid_packages.is_empty() {
        println!(
            "\n{} of {} loaded",
            result.valid_packages.len(),
            result.total()
        );
    }
}

fn summary_line(package: &ValidPackage) -> String {
    let record = &package.record;
    let mut line = format!(
        "{} {:<24} {:>6}/wk",
        package.color,
        record.name,
        abbreviate_number(record.downloads.weekly)
    );

    match (&record.github, record.repository.host_type()) {
        (Some(github), _) => {
            line.push_str(&format!(" {:>6}★", abbreviate_number(github.stargazers_count)));
            if github.archived {
                line.push_str(" [archived]");
            }
        }
        (None, Some(host)) => line.push_str(&format!(" ({host})")),
        (None, None) => {}
    }

    if !record.description.is_empty() {
        line.push_str("  ");
        line.push_str(&record.description);
    }

    line
}
