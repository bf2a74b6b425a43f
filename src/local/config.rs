//! Local configuration management.
//!
//! Config is stored at `~/.config/pkgcmp/config.toml` and contains:
//! - upstream API base URLs (npm registry, npm downloads, GitHub)
//! - an optional proxy prefix or `{url}` template
//! - an optional GitHub token for higher rate limits
//! - the display color palette

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::palette::ColorPalette;
use crate::registry::{GITHUB_API, NPM_DOWNLOADS_API, NPM_REGISTRY, Proxy};

const CONFIG_DIR: &str = "pkgcmp";
const CONFIG_FILE: &str = "config.toml";

/// Local configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// npm registry base URL (default: https://registry.npmjs.org).
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// npm downloads API base URL (default: https://api.npmjs.org).
    #[serde(default = "default_downloads_url")]
    pub downloads_url: String,

    /// GitHub API base URL (default: https://api.github.com).
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Proxy prefix, or a template containing `{url}`.
    #[serde(default)]
    pub proxy: Option<String>,

    /// GitHub personal access token.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Colors assigned to packages, in order.
    #[serde(default)]
    pub palette: ColorPalette,

    /// Maximum number of packages resolved at once. Unset means all of them.
    #[serde(default)]
    pub concurrency: Option<usize>,
}

fn default_registry_url() -> String {
    NPM_REGISTRY.to_string()
}

fn default_downloads_url() -> String {
    NPM_DOWNLOADS_API.to_string()
}

fn default_github_api_url() -> String {
    GITHUB_API.to_string()
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            downloads_url: default_downloads_url(),
            github_api_url: default_github_api_url(),
            proxy: None,
            github_token: None,
            palette: ColorPalette::default(),
            concurrency: None,
        }
    }
}

impl LocalConfig {
    /// Load config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")
    }

    /// Proxy used for every upstream request.
    pub fn proxy(&self) -> Proxy {
        Proxy::new(self.proxy.clone())
    }

    /// Get the GitHub token as a SecretString.
    pub fn github_token_secret(&self) -> Option<SecretString> {
        self.github_token
            .clone()
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    pub fn has_github_token(&self) -> bool {
        self.github_token
            .as_ref()
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }

    pub fn set_github_token(&mut self, token: String) {
        self.github_token = Some(token);
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join(CONFIG_DIR))
    }
}
