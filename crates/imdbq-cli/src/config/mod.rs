//! Application configuration module.
//!
//! Manages the TOML config file holding client defaults such as the
//! response locale.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, ClientConfig};
pub use paths::resolve_config_path;
