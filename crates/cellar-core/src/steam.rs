//! Steam: one `appmanifest_<appid>.acf` per installed title under
//! `steamapps`.

use crate::diagnostics::{Diagnostics, DropReason};
use crate::layout::PrefixLayout;
use crate::source::PlatformSource;
use crate::CoreError;
use cellar_formats::KeyValues;
use cellar_schema::{App, AppId, Platform};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STEAM_CLIENT: &str = "C:\\Program Files (x86)\\Steam\\steam.exe";
pub const STEAMAPPS_DIR: &str = "C:\\Program Files (x86)\\Steam\\steamapps";
const MANIFEST_EXTENSION: &str = "acf";

/// `StateFlags` value of a fully installed title. The field is a bitmask,
/// but any other combination (updating, validating, ...) is treated as not
/// installed.
pub const STATE_FULLY_INSTALLED: &str = "4";

/// Names containing this are SDK redistributables, not games.
const INTERNAL_TOOL_MARKER: &str = "Steamworks";

/// Keep the client's social UI out of the way when launching a game.
const LAUNCH_FLAGS: &str = "-nochatui -nofriendsui -silent";

/// The fields read from an app manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppManifest {
    pub app_id: Option<String>,
    pub launcher_path: Option<String>,
    pub name: Option<String>,
    pub install_dir: Option<String>,
    pub state_flags: Option<String>,
}

impl AppManifest {
    pub fn read(path: &Path) -> Result<Self, CoreError> {
        Ok(Self::from_key_values(&KeyValues::from_file(path)?))
    }

    pub fn from_key_values(kv: &KeyValues) -> Self {
        Self {
            app_id: kv.get("appid"),
            launcher_path: kv.get("LauncherPath"),
            name: kv.get("name"),
            install_dir: kv.get("installdir"),
            state_flags: kv.get("StateFlags"),
        }
    }

    pub fn is_fully_installed(&self) -> bool {
        self.state_flags.as_deref() == Some(STATE_FULLY_INSTALLED)
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("appid", &self.app_id),
            ("LauncherPath", &self.launcher_path),
            ("name", &self.name),
            ("installdir", &self.install_dir),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
        .map(|(k, _)| k)
        .collect()
    }
}

#[derive(Debug, Default)]
pub struct SteamSource;

impl SteamSource {
    pub fn new() -> Self {
        Self
    }

    /// Manifest files directly under `steamapps`, sorted by file name.
    fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn app_from_manifest(
        layout: &PrefixLayout,
        apps_dir: &Path,
        manifest: AppManifest,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<App> {
        if !manifest.is_fully_installed() {
            diagnostics.record(
                Platform::Steam,
                subject,
                DropReason::NotInstalled {
                    state_flags: manifest.state_flags,
                },
            );
            return None;
        }

        let missing = manifest.missing_fields();
        if !missing.is_empty() {
            diagnostics.record(
                Platform::Steam,
                subject,
                DropReason::MissingFields { fields: missing },
            );
            return None;
        }
        let (Some(app_id), Some(launcher_path), Some(name), Some(install_dir)) = (
            manifest.app_id,
            manifest.launcher_path,
            manifest.name,
            manifest.install_dir,
        ) else {
            return None;
        };

        if name.contains(INTERNAL_TOOL_MARKER) {
            diagnostics.record(Platform::Steam, subject, DropReason::InternalTool);
            return None;
        }

        let launcher = layout.translate(&launcher_path);
        if !launcher.is_file() {
            diagnostics.record(
                Platform::Steam,
                subject,
                DropReason::LauncherMissing {
                    path: launcher.display().to_string(),
                },
            );
            return None;
        }

        Some(App {
            name,
            install_dir: apps_dir
                .join("common")
                .join(&install_dir)
                .to_string_lossy()
                .into_owned(),
            executable_path: launcher.to_string_lossy().into_owned(),
            arguments: format!("{LAUNCH_FLAGS} -applaunch {app_id}"),
            id: AppId::new(app_id),
            platform: Platform::Steam,
        })
    }
}

impl PlatformSource for SteamSource {
    fn name(&self) -> &'static str {
        "Steam"
    }

    fn platform(&self) -> Platform {
        Platform::Steam
    }

    fn client_path(&self) -> &'static str {
        STEAM_CLIENT
    }

    fn client_arguments(&self) -> &'static str {
        "-nofriendsui"
    }

    fn installed_apps(
        &self,
        layout: &PrefixLayout,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<App>, CoreError> {
        let apps_dir = layout.translate(STEAMAPPS_DIR);
        if !apps_dir.is_dir() {
            debug!("no steamapps directory at {}", apps_dir.display());
            return Ok(Vec::new());
        }

        let mut apps = Vec::new();
        for path in Self::manifest_files(&apps_dir)? {
            let subject = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let manifest = match AppManifest::read(&path) {
                Ok(m) => m,
                Err(e) => {
                    diagnostics.record(
                        Platform::Steam,
                        subject,
                        DropReason::Unreadable {
                            error: e.to_string(),
                        },
                    );
                    continue;
                }
            };
            if let Some(app) =
                Self::app_from_manifest(layout, &apps_dir, manifest, &subject, diagnostics)
            {
                debug!("found Steam app {} ({})", app.name, app.id);
                apps.push(app);
            }
        }
        Ok(apps)
    }
}
