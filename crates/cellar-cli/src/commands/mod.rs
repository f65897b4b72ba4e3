pub mod completions;
pub mod detect;
pub mod man_pages;
pub mod reg;
pub mod scan;
pub mod show;

use cellar_core::{select_source, PlatformSource};
use cellar_schema::{parse_config_file, CellarConfig, Platform, SchemaError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_PREFIX_ERROR: u8 = 3;

const DEFAULT_PREFIX: &str = "~/.wine";

/// Configuration and Wine prefix a command runs against.
#[derive(Debug)]
pub struct Context {
    pub config: CellarConfig,
    pub prefix: PathBuf,
}

impl Context {
    pub fn load(prefix_flag: Option<&str>, config_path: Option<&Path>) -> Result<Self, String> {
        let config = load_config(config_path)?;
        let prefix = resolve_prefix(prefix_flag, std::env::var("WINEPREFIX").ok(), &config)?;
        debug!("using prefix {}", prefix.display());
        Ok(Self { config, prefix })
    }

    /// Sources named on the command line, or the configured ones.
    pub fn sources(&self, names: &[String]) -> Result<Vec<Box<dyn PlatformSource>>, String> {
        if names.is_empty() {
            sources_for(&self.config.platforms)
        } else {
            names
                .iter()
                .map(|n| select_source(n).map_err(|e| e.to_string()))
                .collect()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<CellarConfig, String> {
    let loaded = match path {
        Some(p) => parse_config_file(p),
        None => match CellarConfig::load_default() {
            Err(SchemaError::HomeNotSet) => Ok(CellarConfig::default()),
            other => other,
        },
    };
    loaded.map_err(|e| format!("config error: {e}"))
}

/// Pick the prefix: flag, then `WINEPREFIX`, then config, then `~/.wine`.
pub fn resolve_prefix(
    flag: Option<&str>,
    env: Option<String>,
    config: &CellarConfig,
) -> Result<PathBuf, String> {
    let raw = flag
        .map(str::to_owned)
        .or(env.filter(|v| !v.is_empty()))
        .or_else(|| config.wine_prefix.clone())
        .unwrap_or_else(|| DEFAULT_PREFIX.to_owned());
    let prefix = expand_tilde(&raw);
    if !prefix.is_dir() {
        return Err(format!(
            "prefix error: {} is not a directory",
            prefix.display()
        ));
    }
    Ok(prefix)
}

pub fn sources_for(platforms: &[Platform]) -> Result<Vec<Box<dyn PlatformSource>>, String> {
    platforms
        .iter()
        .map(|p| select_source(p.as_str()).map_err(|e| format!("config error: {e}")))
        .collect()
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn colorize_platform(platform: Platform) -> String {
    use console::Style;
    let name = platform.display_name();
    match platform {
        Platform::Steam => Style::new().blue().apply_to(name).to_string(),
        Platform::BattleNet => Style::new().cyan().apply_to(name).to_string(),
        Platform::None => Style::new().dim().apply_to(name).to_string(),
    }
}

pub fn colorize_installed(installed: bool) -> String {
    use console::Style;
    if installed {
        Style::new().green().apply_to("yes").to_string()
    } else {
        Style::new().dim().apply_to("no").to_string()
    }
}
