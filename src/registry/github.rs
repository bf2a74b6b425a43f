//! GitHub repository client.

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::client::{GithubSummary, check_status};
use super::error::RegistryError;
use super::proxy::Proxy;

pub const GITHUB_API: &str = "https://api.github.com";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

// GitHub rejects requests without a user agent
const CLIENT_USER_AGENT: &str = concat!("pkgcmp/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client. Only the `repos` endpoint is used.
pub struct GithubClient {
    client: Client,
    proxy: Proxy,
    token: Option<SecretString>,
}

impl GithubClient {
    pub fn new(client: Client, proxy: Proxy, token: Option<SecretString>) -> Self {
        Self {
            client,
            proxy,
            token,
        }
    }

    /// Fetch a repository summary from an already-built API URL
    /// (`https://api.github.com/repos/<owner>/<repo>`).
    pub async fn get_repo(&self, api_url: &str) -> Result<GithubSummary, RegistryError> {
        let url = self.proxy.proxied_url(api_url);
        debug!(url = %url, authenticated = self.token.is_some(), "fetching github repository");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(USER_AGENT, CLIENT_USER_AGENT);

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }

        let response = request.send().await?;
        let response = check_status(response, &url, || {
            RegistryError::RepositoryNotFound(api_url.to_string())
        })?;

        let summary: GithubSummary = response.json().await?;
        Ok(summary)
    }
}
