//! Application model, identifiers, and configuration for Cellar.
//!
//! This crate defines the schema layer shared by every other crate: the
//! unified [`App`] record produced by discovery, the closed [`Platform`] set,
//! string newtypes for identifiers, and the TOML configuration file
//! (`CellarConfig`).

pub mod app;
pub mod config;
pub mod types;

pub use app::{App, Platform};
pub use config::{default_config_path, parse_config_file, parse_config_str, CellarConfig};
pub use types::AppId;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("unknown platform '{0}', expected one of: steam, battlenet")]
    UnknownPlatform(String),
    #[error("HOME is not set")]
    HomeNotSet,
}
