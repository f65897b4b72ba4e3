use crate::app::Platform;
use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CellarConfig {
    /// Wine prefix to scan when none is given on the command line.
    #[serde(default)]
    pub wine_prefix: Option<String>,
    /// Emit an entry for each detected platform client before its titles.
    #[serde(default = "default_include_launchers")]
    pub include_launchers: bool,
    /// Platforms to scan, in output order.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

impl Default for CellarConfig {
    fn default() -> Self {
        Self {
            wine_prefix: None,
            include_launchers: default_include_launchers(),
            platforms: default_platforms(),
        }
    }
}

fn default_include_launchers() -> bool {
    true
}

fn default_platforms() -> Vec<Platform> {
    vec![Platform::Steam, Platform::BattleNet]
}

impl CellarConfig {
    /// Load `~/.config/cellar/config.toml`, or defaults if it does not exist.
    pub fn load_default() -> Result<Self, SchemaError> {
        let path = default_config_path()?;
        if path.exists() {
            parse_config_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, SchemaError> {
    let home = std::env::var("HOME").map_err(|_| SchemaError::HomeNotSet)?;
    Ok(PathBuf::from(home).join(".config/cellar/config.toml"))
}

pub fn parse_config_str(input: &str) -> Result<CellarConfig, SchemaError> {
    Ok(toml::from_str(input)?)
}

pub fn parse_config_file(path: impl AsRef<Path>) -> Result<CellarConfig, SchemaError> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}
