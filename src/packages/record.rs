//! Records produced by package resolution.

use serde::{Deserialize, Serialize};

use crate::hosting::{HostType, HostedRepository};
use crate::registry::GithubSummary;

/// Host classification of a package's repository.
///
/// Both fields are set or both are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    host_type: Option<HostType>,
    browse_url: Option<String>,
}

impl RepositoryInfo {
    /// No usable repository URL.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn host_type(&self) -> Option<HostType> {
        self.host_type
    }

    pub fn browse_url(&self) -> Option<&str> {
        self.browse_url.as_deref()
    }

    pub fn is_github(&self) -> bool {
        self.host_type == Some(HostType::Github)
    }
}

impl From<HostedRepository> for RepositoryInfo {
    fn from(repo: HostedRepository) -> Self {
        Self {
            host_type: Some(repo.host),
            browse_url: Some(repo.browse_url()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageLinks {
    pub registry_url: String,
    pub homepage_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStats {
    pub weekly: u64,
}

/// Everything known about one successfully resolved package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub readme: String,
    pub repository: RepositoryInfo,
    pub links: PackageLinks,
    pub github: Option<GithubSummary>,
    pub downloads: DownloadStats,
}

/// A resolved package with the display color it was assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidPackage {
    #[serde(flatten)]
    pub record: PackageRecord,
    pub color: String,
}

/// A package that could not be loaded. Only the requested name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    pub has_error: bool,
    pub name: String,
}

impl FailureRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            has_error: true,
            name: name.into(),
        }
    }
}

/// Outcome of resolving one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(PackageRecord),
    Failed(FailureRecord),
}

/// Result of a whole `fetch_packages` call, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub valid_packages: Vec<ValidPackage>,
    pub invalid_packages: Vec<String>,
}

impl AggregateResult {
    /// Number of identifiers the result accounts for.
    pub fn total(&self) -> usize {
        self.valid_packages.len() + self.invalid_packages.len()
    }
}
