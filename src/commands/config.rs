//! Config command - manage local configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::local::LocalConfig;

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub command: ConfigSubCmd,
}

#[derive(Subcommand)]
pub enum ConfigSubCmd {
    /// Route requests through a proxy (prefix, or template containing {url})
    SetProxy(SetProxyCmd),

    /// Send requests directly
    ClearProxy,

    /// Set the GitHub token used for repository lookups
    SetGithubToken(SetGithubTokenCmd),

    /// Set the npm registry URL (default: https://registry.npmjs.org)
    SetRegistryUrl(SetRegistryUrlCmd),

    /// Show current configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Args)]
pub struct SetProxyCmd {
    /// Proxy prefix (e.g., https://cors.example.com/) or template (https://p.example/?u={url})
    pub proxy: String,
}

#[derive(Args)]
pub struct SetGithubTokenCmd {
    /// GitHub personal access token
    #[arg(env = "GITHUB_TOKEN")]
    pub token: String,
}

#[derive(Args)]
pub struct SetRegistryUrlCmd {
    /// Registry base URL (e.g., https://registry.npmmirror.com)
    pub url: String,
}

impl ConfigCmd {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            ConfigSubCmd::SetProxy(cmd) => {
                let mut config = LocalConfig::load()?;
                config.proxy = Some(cmd.proxy.clone());
                config.save()?;
                println!("Proxy set to: {}", cmd.proxy);
            }
            ConfigSubCmd::ClearProxy => {
                let mut config = LocalConfig::load()?;
                config.proxy = None;
                config.save()?;
                println!("Proxy cleared.");
            }
            ConfigSubCmd::SetGithubToken(cmd) => {
                let mut config = LocalConfig::load()?;
                config.set_github_token(cmd.token.clone());
                config.save()?;
                println!("GitHub token saved.");
            }
            ConfigSubCmd::SetRegistryUrl(cmd) => {
                let mut config = LocalConfig::load()?;
                config.registry_url = cmd.url.clone();
                config.save()?;
                println!("Registry URL set to: {}", cmd.url);
            }
            ConfigSubCmd::Show => {
                let config = LocalConfig::load()?;
                println!("Config: {}", LocalConfig::config_path()?.display());
                println!();
                println!("registry_url:   {}", config.registry_url);
                println!("downloads_url:  {}", config.downloads_url);
                println!("github_api_url: {}", config.github_api_url);
                println!("proxy:          {}", proxy_label(&config));
                println!(
                    "github_token:   {}",
                    if config.has_github_token() {
                        "(set)"
                    } else {
                        "(not set)"
                    }
                );
                println!("palette:        {}", config.palette.colors().join(", "));
                match config.concurrency {
                    Some(n) => println!("concurrency:    {}", n),
                    None => println!("concurrency:    (unbounded)"),
                }
            }
            ConfigSubCmd::Path => {
                println!("{}", LocalConfig::config_path()?.display());
            }
        }
        Ok(())
    }
}

/// A blank proxy setting is treated as no proxy at all.
fn proxy_label(config: &LocalConfig) -> &str {
    match config.proxy.as_deref() {
        Some(proxy) if !config.proxy().is_direct() => proxy,
        _ => "(direct)",
    }
}
