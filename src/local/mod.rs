//! Local, per-user files: configuration and persisted state.
//!
//! Both live in the platform config directory:
//! - `pkgcmp/config.toml` - upstream URLs, proxy, token, palette
//! - `pkgcmp/state.json` - values remembered between runs

mod config;
mod state;

pub use config::LocalConfig;
pub use state::{LAST_PACKAGES_KEY, StateStore};
