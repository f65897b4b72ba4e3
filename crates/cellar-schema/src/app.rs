use crate::types::AppId;
use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distribution platform an [`App`] was discovered through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    None,
    Steam,
    #[serde(rename = "battlenet")]
    BattleNet,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Steam => "steam",
            Self::BattleNet => "battlenet",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Steam => "Steam",
            Self::BattleNet => "Battle.net",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "steam" => Ok(Self::Steam),
            "battlenet" | "battle.net" | "bnet" => Ok(Self::BattleNet),
            _ => Err(SchemaError::UnknownPlatform(s.to_owned())),
        }
    }
}

/// One launchable application found in a prefix.
///
/// `executable_path` and `install_dir` are host paths. `arguments` is the raw,
/// unescaped argument string; quoting it for a shell is the launcher's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    pub install_dir: String,
    pub executable_path: String,
    pub arguments: String,
    pub id: AppId,
    pub platform: Platform,
}

impl App {
    /// Executable followed by its arguments, the way a launcher would run it.
    pub fn launch_line(&self) -> String {
        if self.arguments.is_empty() {
            self.executable_path.clone()
        } else {
            format!("{} {}", self.executable_path, self.arguments)
        }
    }

    /// Synthetic entries for a platform's own client carry no id.
    pub fn is_launcher(&self) -> bool {
        self.id.is_unset()
    }
}
