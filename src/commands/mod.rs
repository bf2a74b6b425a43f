//! CLI command implementations.

mod compare;
mod config;
mod downloads;

pub use compare::CompareCmd;
pub use config::ConfigCmd;
pub use downloads::DownloadsCmd;
