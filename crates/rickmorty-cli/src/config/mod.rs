//! Application configuration module.
//!
//! Reads the TOML config file holding API connection overrides.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
