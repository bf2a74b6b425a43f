//! npm download statistics client.

use reqwest::Client;
use tracing::debug;

use super::client::{DownloadPeriod, DownloadPoint, check_status};
use super::error::RegistryError;
use super::proxy::Proxy;

pub const NPM_DOWNLOADS_API: &str = "https://api.npmjs.org";

/// Client for `api.npmjs.org/downloads`.
pub struct DownloadsClient {
    client: Client,
    api_url: String,
    proxy: Proxy,
}

impl DownloadsClient {
    pub fn with_api_url(client: Client, api_url: String, proxy: Proxy) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            proxy,
        }
    }

    /// Total downloads of `name` over `period`.
    ///
    /// Scoped names are passed through unencoded; the downloads API expects
    /// the literal `@scope/name` path.
    pub async fn fetch_point(
        &self,
        name: &str,
        period: DownloadPeriod,
    ) -> Result<DownloadPoint, RegistryError> {
        let url = self.proxy.proxied_url(&format!(
            "{}/downloads/point/{}/{}",
            self.api_url, period, name
        ));
        debug!(package = name, period = %period, url = %url, "fetching download count");

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url, || {
            RegistryError::PackageNotFound(name.to_string())
        })?;

        let point: DownloadPoint = response.json().await?;
        Ok(point)
    }
}
