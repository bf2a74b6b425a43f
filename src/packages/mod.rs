//! Package metadata aggregation.
//!
//! Resolves a list of npm package names into enriched records by fanning out
//! one resolution per name, joining all of them, and partitioning the
//! outcomes into valid and invalid packages in input order.
//!
//! Each resolution runs its steps in sequence (registry metadata, repository
//! classification, GitHub summary for GitHub-hosted packages, weekly
//! downloads). Resolutions are independent: a failure in one never affects
//! another, and the failed name is reported in `invalid_packages`.
//!
//! # Example
//!
//! ```ignore
//! use crate::packages::PackageAggregator;
//!
//! let aggregator = PackageAggregator::new(HttpSource::from_config(&config)?, config.palette.clone());
//! let result = aggregator.fetch_packages(Some(&["react", "vue"])).await;
//! ```

mod error;
mod record;

pub use error::ResolveError;
pub use record::{
    AggregateResult, DownloadStats, FailureRecord, PackageLinks, PackageRecord, RepositoryInfo,
    Resolution, ValidPackage,
};

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::hosting::classify_repository_url;
use crate::palette::ColorPalette;
use crate::registry::{DownloadPeriod, GITHUB_API, PackageSource, package_page_url};

// Everything after this marker in a GitHub browse URL is `/<owner>/<repo>`
const GITHUB_HOST_MARKER: &str = ".com";

/// Fans out package resolutions over a [`PackageSource`].
pub struct PackageAggregator<S> {
    source: S,
    palette: ColorPalette,
    github_api_url: String,
    concurrency: Option<usize>,
}

impl<S: PackageSource> PackageAggregator<S> {
    pub fn new(source: S, palette: ColorPalette) -> Self {
        Self {
            source,
            palette,
            github_api_url: GITHUB_API.to_string(),
            concurrency: None,
        }
    }

    pub fn with_github_api_url(mut self, github_api_url: impl Into<String>) -> Self {
        self.github_api_url = github_api_url.into();
        self
    }

    /// Cap the number of in-flight resolutions. `None` resolves everything at once.
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// Resolve every identifier and partition the outcomes.
    ///
    /// `None` and an empty list both return an empty result without touching
    /// the source. Duplicates are resolved independently.
    pub async fn fetch_packages<I: AsRef<str>>(&self, identifiers: Option<&[I]>) -> AggregateResult {
        let Some(identifiers) = identifiers else {
            return AggregateResult::default();
        };

        if identifiers.is_empty() {
            return AggregateResult::default();
        }

        let limit = self.concurrency.unwrap_or(identifiers.len()).max(1);
        debug!(count = identifiers.len(), limit, "resolving packages");

        // `buffered` yields in input order regardless of completion order
        let resolutions: Vec<Resolution> = stream::iter(
            identifiers
                .iter()
                .map(|identifier| self.resolve_or_fail(identifier.as_ref())),
        )
        .buffered(limit)
        .collect()
        .await;

        partition(resolutions, &self.palette)
    }

    /// Failure boundary for a single identifier.
    async fn resolve_or_fail(&self, identifier: &str) -> Resolution {
        match self.resolve_package(identifier).await {
            Ok(record) if !record.name.is_empty() => Resolution::Resolved(record),
            Ok(_) => {
                warn!(package = identifier, "registry returned a package without a name");
                Resolution::Failed(FailureRecord::new(identifier))
            }
            Err(e) => {
                warn!(package = identifier, error = %e, "failed to load package");
                Resolution::Failed(FailureRecord::new(identifier))
            }
        }
    }

    /// Resolve one identifier into a record. The record has no color yet.
    pub async fn resolve_package(&self, identifier: &str) -> Result<PackageRecord, ResolveError> {
        let metadata = self.source.registry_metadata(identifier).await?;

        let repository = repository_info(metadata.repository_url());

        let github = match repository.browse_url() {
            Some(browse_url) if repository.is_github() => {
                let api_url = github_api_url(&self.github_api_url, browse_url)?;
                Some(self.source.github_repo(&api_url).await?)
            }
            _ => None,
        };

        let weekly = self
            .source
            .download_point(&metadata.name, DownloadPeriod::LastWeek)
            .await?;

        Ok(PackageRecord {
            id: metadata.name.clone(),
            links: PackageLinks {
                registry_url: package_page_url(&metadata.name),
                homepage_url: metadata.homepage.unwrap_or_default(),
            },
            name: metadata.name,
            description: metadata.description.unwrap_or_default(),
            readme: metadata.readme.unwrap_or_default(),
            repository,
            github,
            downloads: DownloadStats {
                weekly: weekly.downloads,
            },
        })
    }
}

/// Split resolutions into colored successes and failed names, keeping order.
///
/// Colors follow position among successes only, wrapping past the end of
/// the palette.
pub fn partition(resolutions: Vec<Resolution>, palette: &ColorPalette) -> AggregateResult {
    let mut result = AggregateResult::default();

    for resolution in resolutions {
        match resolution {
            Resolution::Resolved(record) => {
                let color = palette.color_for(result.valid_packages.len()).to_string();
                result.valid_packages.push(ValidPackage { record, color });
            }
            Resolution::Failed(failure) => result.invalid_packages.push(failure.name),
        }
    }

    result
}

/// Classification errors degrade to an unknown repository.
fn repository_info(raw_url: &str) -> RepositoryInfo {
    match classify_repository_url(raw_url) {
        Ok(repo) => repo.into(),
        Err(e) => {
            debug!(url = raw_url, error = %e, "unrecognized repository url");
            RepositoryInfo::unknown()
        }
    }
}

/// `https://github.com/<owner>/<repo>` -> `<api>/repos/<owner>/<repo>`
pub fn github_api_url(api_base: &str, browse_url: &str) -> Result<String, ResolveError> {
    let (_, path) = browse_url
        .split_once(GITHUB_HOST_MARKER)
        .ok_or_else(|| ResolveError::MalformedGithubUrl(browse_url.to_string()))?;
    let path = path.strip_suffix(".git").unwrap_or(path);

    Ok(format!("{}/repos{}", api_base.trim_end_matches('/'), path))
}
