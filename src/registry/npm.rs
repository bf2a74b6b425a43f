//! npm registry client.

use reqwest::Client;
use tracing::debug;

use super::client::{RegistryMetadata, check_status};
use super::error::RegistryError;
use super::proxy::{Proxy, encode_component};

pub const NPM_REGISTRY: &str = "https://registry.npmjs.org";
pub const NPM_WEBSITE: &str = "https://npmjs.com";

/// npm registry client.
pub struct NpmClient {
    client: Client,
    registry_url: String,
    proxy: Proxy,
}

impl NpmClient {
    pub fn with_registry_url(client: Client, registry_url: String, proxy: Proxy) -> Self {
        Self {
            client,
            registry_url: registry_url.trim_end_matches('/').to_string(),
            proxy,
        }
    }

    /// URL of the registry document for `name`, before proxying.
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.registry_url, encode_component(name))
    }

    /// Get the full registry document for a package.
    pub async fn get_package_metadata(&self, name: &str) -> Result<RegistryMetadata, RegistryError> {
        let url = self.proxy.proxied_url(&self.package_url(name));
        debug!(package = name, url = %url, "fetching npm package");

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url, || {
            RegistryError::PackageNotFound(name.to_string())
        })?;

        let metadata: RegistryMetadata = response.json().await?;
        Ok(metadata)
    }
}

/// Public npm page for a package.
pub fn package_page_url(name: &str) -> String {
    format!("{}/package/{}", NPM_WEBSITE, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NpmClient {
        NpmClient::with_registry_url(Client::new(), server.uri(), Proxy::default())
    }

    #[test]
    fn test_package_url_encodes_scope() {
        let client =
            NpmClient::with_registry_url(Client::new(), NPM_REGISTRY.to_string(), Proxy::default());
        assert_eq!(
            client.package_url("@babel/core"),
            "https://registry.npmjs.org/%40babel%2Fcore"
        );
        assert_eq!(client.package_url("react"), "https://registry.npmjs.org/react");
    }

    #[test]
    fn test_package_page_url() {
        assert_eq!(package_page_url("react"), "https://npmjs.com/package/react");
        assert_eq!(
            package_page_url("@types/node"),
            "https://npmjs.com/package/@types/node"
        );
    }

    #[tokio::test]
    async fn test_get_package_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/react"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "react",
                "description": "React is a JavaScript library for building user interfaces.",
                "homepage": "https://react.dev/",
                "readme": "# react",
                "repository": {"type": "git", "url": "git+https://github.com/facebook/react.git"}
            })))
            .mount(&server)
            .await;

        let meta = client_for(&server).get_package_metadata("react").await.unwrap();
        assert_eq!(meta.name, "react");
        assert_eq!(meta.homepage.as_deref(), Some("https://react.dev/"));
        assert_eq!(meta.repository_url(), "git+https://github.com/facebook/react.git");
    }

    #[tokio::test]
    async fn test_get_package_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/does-not-exist"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_package_metadata("does-not-exist")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound(name) if name == "does-not-exist"));
    }

    #[tokio::test]
    async fn test_get_package_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).get_package_metadata("react").await.unwrap_err();
        assert!(matches!(err, RegistryError::UnexpectedStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_package_through_prefix_proxy() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/proxy/https:/+registry\.npmjs\.org/lodash$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "lodash"})),
            )
            .mount(&server)
            .await;

        let proxy = Proxy::new(Some(format!("{}/proxy/", server.uri())));
        let client =
            NpmClient::with_registry_url(Client::new(), NPM_REGISTRY.to_string(), proxy);
        let meta = client.get_package_metadata("lodash").await.unwrap();
        assert_eq!(meta.name, "lodash");
    }

    // Hits the real npm registry.
    #[tokio::test]
    #[ignore]
    async fn test_get_package_lodash() {
        let client =
            NpmClient::with_registry_url(Client::new(), NPM_REGISTRY.to_string(), Proxy::default());
        let meta = client.get_package_metadata("lodash").await.unwrap();
        assert_eq!(meta.name, "lodash");
    }
}
