//! Proxy URL rewriting.
//!
//! Upstream requests can be routed through a CORS-safe proxy. The proxy is
//! configured either as a plain prefix (`https://proxy.example/`) or as a
//! template with a `{url}` placeholder, in which case the target URL is
//! percent-encoded before substitution.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const URL_PLACEHOLDER: &str = "{url}";

// Characters `encodeURIComponent` leaves alone
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Rewrites upstream URLs so they go through the configured proxy.
/// The default proxy leaves URLs untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proxy {
    template: Option<String>,
}

impl Proxy {
    pub fn new(template: Option<String>) -> Self {
        Self {
            template: template.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn is_direct(&self) -> bool {
        self.template.is_none()
    }

    /// Route `raw` through the proxy.
    pub fn proxied_url(&self, raw: &str) -> String {
        match &self.template {
            None => raw.to_string(),
            Some(template) if template.contains(URL_PLACEHOLDER) => {
                template.replace(URL_PLACEHOLDER, &encode_component(raw))
            }
            Some(prefix) => format!("{prefix}{raw}"),
        }
    }
}

/// Percent-encode a single URL component (`@scope/name` -> `%40scope%2Fname`).
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_proxy_is_identity() {
        let proxy = Proxy::default();
        assert!(proxy.is_direct());
        assert_eq!(
            proxy.proxied_url("https://registry.npmjs.org/react"),
            "https://registry.npmjs.org/react"
        );
    }

    #[test]
    fn test_prefix_proxy() {
        let proxy = Proxy::new(Some("https://cors.example.com/".to_string()));
        assert_eq!(
            proxy.proxied_url("https://api.github.com/repos/facebook/react"),
            "https://cors.example.com/https://api.github.com/repos/facebook/react"
        );
    }

    #[test]
    fn test_template_proxy_encodes_target() {
        let proxy = Proxy::new(Some("https://proxy.example.com/?url={url}".to_string()));
        assert_eq!(
            proxy.proxied_url("https://registry.npmjs.org/%40babel%2Fcore"),
            "https://proxy.example.com/?url=https%3A%2F%2Fregistry.npmjs.org%2F%2540babel%252Fcore"
        );
    }

    #[test]
    fn test_blank_proxy_is_direct() {
        assert!(Proxy::new(Some("   ".to_string())).is_direct());
        assert!(Proxy::new(None).is_direct());
    }

    #[test]
    fn test_encode_component_scoped_name() {
        assert_eq!(encode_component("@angular/core"), "%40angular%2Fcore");
        assert_eq!(encode_component("lodash"), "lodash");
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("~!*'()-_."), "~!*'()-_.");
        assert_eq!(encode_component("a+b&c=d"), "a%2Bb%26c%3Dd");
        assert_eq!(encode_component("caf\u{e9}"), "caf%C3%A9");
    }
}
