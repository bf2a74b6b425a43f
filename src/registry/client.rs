//! Package source trait and common types.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// The slice of an npm registry document the aggregator reads.
///
/// Every field is optional upstream; missing values fall back to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub readme: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

impl RegistryMetadata {
    /// Raw repository URL, or an empty string when the package has none.
    pub fn repository_url(&self) -> &str {
        self.repository
            .as_ref()
            .and_then(RepositoryField::url)
            .unwrap_or_default()
    }
}

/// npm allows `repository` to be either a bare string or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Shorthand(String),
    Detailed {
        #[serde(default)]
        url: Option<String>,
        #[serde(rename = "type", default)]
        _repo_type: Option<String>,
    },
}

impl RepositoryField {
    pub fn url(&self) -> Option<&str> {
        match self {
            RepositoryField::Shorthand(url) => Some(url),
            RepositoryField::Detailed { url, .. } => url.as_deref(),
        }
    }
}

/// Repository summary from the GitHub `repos` API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubSummary {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub subscribers_count: u64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub license: Option<GithubLicense>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single download count over a period, from the npm downloads API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadPoint {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub package: String,
}

/// Periods understood by the npm downloads point API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DownloadPeriod {
    LastDay,
    #[default]
    LastWeek,
    LastMonth,
}

impl DownloadPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadPeriod::LastDay => "last-day",
            DownloadPeriod::LastWeek => "last-week",
            DownloadPeriod::LastMonth => "last-month",
        }
    }
}

impl fmt::Display for DownloadPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DownloadPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-day" | "day" => Ok(DownloadPeriod::LastDay),
            "last-week" | "week" => Ok(DownloadPeriod::LastWeek),
            "last-month" | "month" => Ok(DownloadPeriod::LastMonth),
            _ => Err(format!("unknown download period: {}", s)),
        }
    }
}

/// Everything the aggregator needs from the outside world.
///
/// The HTTP implementation lives in [`super::HttpSource`]; tests swap in
/// in-memory fakes.
pub trait PackageSource: Send + Sync {
    /// Get registry metadata for a package.
    fn registry_metadata(&self, name: &str) -> impl Future<Output = Result<RegistryMetadata, RegistryError>> + Send;

    /// Get a repository summary from a fully-formed GitHub API URL.
    fn github_repo(&self, api_url: &str) -> impl Future<Output = Result<GithubSummary, RegistryError>> + Send;

    /// Get the download count for a package over a period.
    fn download_point(&self, name: &str, period: DownloadPeriod) -> impl Future<Output = Result<DownloadPoint, RegistryError>> + Send;
}

/// Map non-success statuses to registry errors. `not_found` builds the 404 error.
pub(crate) fn check_status(
    response: Response,
    url: &str,
    not_found: impl FnOnce() -> RegistryError,
) -> Result<Response, RegistryError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(not_found());
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RegistryError::RateLimited);
    }

    if !status.is_success() {
        return Err(RegistryError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response)
}
