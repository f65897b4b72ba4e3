use crate::diagnostics::{Diagnostic, Diagnostics, DropReason};
use crate::layout::PrefixLayout;
use crate::source::{default_sources, PlatformSource};
use cellar_schema::{App, AppId, Platform};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryOptions {
    /// Emit each detected platform's client as an app ahead of its titles.
    pub include_launchers: bool,
}

/// Result of one discovery run.
#[derive(Debug, Default, Serialize)]
pub struct DiscoveryReport {
    pub apps: Vec<App>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiscoveryReport {
    /// Find an app by id, or by case-insensitive name.
    pub fn find(&self, query: &str) -> Option<&App> {
        self.apps
            .iter()
            .find(|a| !a.id.is_unset() && a.id == query)
            .or_else(|| {
                self.apps
                    .iter()
                    .find(|a| a.name.eq_ignore_ascii_case(query))
            })
    }
}

/// Whether a platform's client is present in the prefix.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStatus {
    pub name: &'static str,
    pub platform: Platform,
    pub client_path: PathBuf,
    pub installed: bool,
}

/// Run `sources` against the prefix at `prefix_root`, in order.
///
/// Never fails: a platform that is not installed contributes nothing, and a
/// source that cannot read its data contributes a diagnostic instead of apps.
pub fn discover(
    prefix_root: &Path,
    sources: &[Box<dyn PlatformSource>],
    options: DiscoveryOptions,
) -> DiscoveryReport {
    let layout = PrefixLayout::new(prefix_root);
    let mut diagnostics = Diagnostics::new();
    let mut apps = Vec::new();

    for source in sources {
        if !source.is_installed(&layout) {
            debug!("{} is not installed in {}", source.name(), prefix_root.display());
            continue;
        }

        if options.include_launchers {
            apps.push(launcher_app(&layout, source.as_ref()));
        }

        match source.installed_apps(&layout, &mut diagnostics) {
            Ok(found) => {
                info!("{}: {} apps", source.name(), found.len());
                apps.extend(found);
            }
            Err(e) => diagnostics.record(
                source.platform(),
                source.name(),
                DropReason::SourceFailed {
                    error: e.to_string(),
                },
            ),
        }
    }

    DiscoveryReport {
        apps,
        diagnostics: diagnostics.into_vec(),
    }
}

fn launcher_app(layout: &PrefixLayout, source: &dyn PlatformSource) -> App {
    App {
        name: source.name().to_owned(),
        install_dir: String::new(),
        executable_path: layout
            .translate(source.client_path())
            .to_string_lossy()
            .into_owned(),
        arguments: source.client_arguments().to_owned(),
        id: AppId::default(),
        platform: source.platform(),
    }
}

/// Discovery bound to one prefix and a fixed list of sources.
pub struct Engine {
    layout: PrefixLayout,
    sources: Vec<Box<dyn PlatformSource>>,
}

impl Engine {
    /// Engine over every supported platform.
    pub fn new(prefix_root: impl Into<PathBuf>) -> Self {
        Self::with_sources(prefix_root, default_sources())
    }

    pub fn with_sources(
        prefix_root: impl Into<PathBuf>,
        sources: Vec<Box<dyn PlatformSource>>,
    ) -> Self {
        Self {
            layout: PrefixLayout::new(prefix_root),
            sources,
        }
    }

    pub fn layout(&self) -> &PrefixLayout {
        &self.layout
    }

    pub fn detect(&self) -> Vec<PlatformStatus> {
        self.sources
            .iter()
            .map(|s| PlatformStatus {
                name: s.name(),
                platform: s.platform(),
                client_path: self.layout.translate(s.client_path()),
                installed: s.is_installed(&self.layout),
            })
            .collect()
    }

    pub fn discover(&self, options: DiscoveryOptions) -> DiscoveryReport {
        info!("scanning prefix {}", self.layout.root().display());
        discover(self.layout.root(), &self.sources, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use cellar_formats::FormatError;
    use std::fs;

    struct FixedSource {
        platform: Platform,
        installed: bool,
        result: fn() -> Result<Vec<App>, CoreError>,
    }

    impl PlatformSource for FixedSource {
        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn platform(&self) -> Platform {
            self.platform
        }

        fn client_path(&self) -> &'static str {
            "C:\\Fixed\\fixed.exe"
        }

        fn is_installed(&self, _layout: &PrefixLayout) -> bool {
            self.installed
        }

        fn installed_apps(
            &self,
            _layout: &PrefixLayout,
            _diagnostics: &mut Diagnostics,
        ) -> Result<Vec<App>, CoreError> {
            (self.result)()
        }
    }

    fn one_app() -> Result<Vec<App>, CoreError> {
        Ok(vec![App {
            name: "Fixed Game".to_owned(),
            install_dir: "/games/fixed".to_owned(),
            executable_path: "/games/fixed/game.exe".to_owned(),
            arguments: String::new(),
            id: AppId::new("1"),
            platform: Platform::Steam,
        }])
    }

    fn corrupt() -> Result<Vec<App>, CoreError> {
        Err(CoreError::Format(FormatError::NotFound(PathBuf::from("product.db"))))
    }

    fn fixed(
        platform: Platform,
        installed: bool,
        result: fn() -> Result<Vec<App>, CoreError>,
    ) -> Box<dyn PlatformSource> {
        Box::new(FixedSource {
            platform,
            installed,
            result,
        })
    }

    #[test]
    fn empty_prefix_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = Engine::new(dir.path()).discover(DiscoveryOptions {
            include_launchers: true,
        });
        assert!(report.apps.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn uninstalled_sources_are_not_queried() {
        let dir = tempfile::tempdir().unwrap();
        let sources = vec![fixed(Platform::Steam, false, corrupt)];
        let report = discover(dir.path(), &sources, DiscoveryOptions::default());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn failing_source_does_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let sources = vec![
            fixed(Platform::BattleNet, true, corrupt),
            fixed(Platform::Steam, true, one_app),
        ];
        let report = discover(dir.path(), &sources, DiscoveryOptions::default());
        assert_eq!(report.apps.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        let diag = &report.diagnostics[0];
        assert_eq!(diag.platform, Platform::BattleNet);
        assert!(matches!(diag.reason, DropReason::SourceFailed { .. }));
    }

    #[test]
    fn launchers_precede_their_titles() {
        let dir = tempfile::tempdir().unwrap();
        let sources = vec![
            fixed(Platform::Steam, true, one_app),
            fixed(Platform::BattleNet, true, one_app),
        ];
        let report = discover(
            dir.path(),
            &sources,
            DiscoveryOptions {
                include_launchers: true,
            },
        );
        let launchers: Vec<_> = report.apps.iter().map(App::is_launcher).collect();
        assert_eq!(launchers, vec![true, false, true, false]);
        assert_eq!(report.apps[2].platform, Platform::BattleNet);
        assert!(report.apps[0].install_dir.is_empty());
        assert!(report.apps[0].executable_path.ends_with("drive_c/Fixed/fixed.exe"));
    }

    #[test]
    fn detect_reports_every_source() {
        let dir = tempfile::tempdir().unwrap();
        let steam = dir.path().join("drive_c/Program Files (x86)/Steam");
        fs::create_dir_all(&steam).unwrap();
        fs::write(steam.join("steam.exe"), b"MZ").unwrap();

        let status = Engine::new(dir.path()).detect();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].platform, Platform::Steam);
        assert!(status[0].installed);
        assert_eq!(status[1].name, "Battle.net");
        assert!(!status[1].installed);
    }

    #[test]
    fn find_by_id_then_name() {
        let report = DiscoveryReport {
            apps: one_app().unwrap(),
            diagnostics: Vec::new(),
        };
        assert_eq!(report.find("1").unwrap().name, "Fixed Game");
        assert_eq!(report.find("fixed game").unwrap().id, "1");
        assert!(report.find("2").is_none());
    }
}
