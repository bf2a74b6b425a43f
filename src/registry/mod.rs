//! Upstream clients for npm metadata, npm download counts and GitHub.
//!
//! Each client wraps a shared `reqwest::Client` and routes requests through
//! the configured [`Proxy`]. [`HttpSource`] bundles them behind the
//! [`PackageSource`] trait the aggregator consumes.
//!
//! # Example
//!
//! ```ignore
//! use crate::registry::{HttpSource, PackageSource};
//!
//! let source = HttpSource::from_config(&LocalConfig::default())?;
//! let meta = source.registry_metadata("react").await?;
//! ```

mod client;
mod downloads;
mod error;
mod github;
mod npm;
mod proxy;

pub use client::{DownloadPeriod, DownloadPoint, GithubSummary, PackageSource, RegistryMetadata};
pub use downloads::{DownloadsClient, NPM_DOWNLOADS_API};
pub use error::RegistryError;
pub use github::{GITHUB_API, GithubClient};
pub use npm::{NPM_REGISTRY, NpmClient, package_page_url};
pub use proxy::Proxy;

use reqwest::Client;

use crate::local::LocalConfig;

/// [`PackageSource`] backed by the live npm and GitHub HTTP APIs.
pub struct HttpSource {
    npm: NpmClient,
    downloads: DownloadsClient,
    github: GithubClient,
}

impl HttpSource {
    pub fn new(npm: NpmClient, downloads: DownloadsClient, github: GithubClient) -> Self {
        Self {
            npm,
            downloads,
            github,
        }
    }

    /// Build all clients from local configuration, sharing one connection pool.
    pub fn from_config(config: &LocalConfig) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(concat!("pkgcmp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let proxy = config.proxy();

        Ok(Self::new(
            NpmClient::with_registry_url(client.clone(), config.registry_url.clone(), proxy.clone()),
            DownloadsClient::with_api_url(client.clone(), config.downloads_url.clone(), proxy.clone()),
            GithubClient::new(client, proxy, config.github_token_secret()),
        ))
    }
}

impl PackageSource for HttpSource {
    async fn registry_metadata(&self, name: &str) -> Result<RegistryMetadata, RegistryError> {
        self.npm.get_package_metadata(name).await
    }

    async fn github_repo(&self, api_url: &str) -> Result<GithubSummary, RegistryError> {
        self.github.get_repo(api_url).await
    }

    async fn download_point(
        &self,
        name: &str,
        period: DownloadPeriod,
    ) -> Result<DownloadPoint, RegistryError> {
        self.downloads.fetch_point(name, period).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let source = HttpSource::from_config(&LocalConfig::default()).unwrap();
        assert_eq!(
            source.npm.package_url("react"),
            "https://registry.npmjs.org/react"
        );
    }
}
