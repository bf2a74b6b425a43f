//! Per-package resolution errors.

use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unexpected github browse url: {0}")]
    MalformedGithubUrl(String),
}
