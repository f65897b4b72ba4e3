use crate::diagnostics::Diagnostics;
use crate::layout::PrefixLayout;
use crate::CoreError;
use cellar_schema::{App, Platform};

/// One distribution platform's view of a prefix.
pub trait PlatformSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn platform(&self) -> Platform;

    /// Windows path of the platform's own client. Its presence is what marks
    /// the platform as installed.
    fn client_path(&self) -> &'static str;

    /// Arguments used when the client itself is launched.
    fn client_arguments(&self) -> &'static str {
        ""
    }

    fn is_installed(&self, layout: &PrefixLayout) -> bool {
        layout.file_exists(self.client_path())
    }

    /// Every launchable title this platform has installed in the prefix.
    ///
    /// Records that cannot be turned into an app are reported to
    /// `diagnostics` and skipped. An `Err` means the platform's data could
    /// not be read at all; a missing data directory is not an error and
    /// yields an empty list.
    fn installed_apps(
        &self,
        layout: &PrefixLayout,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<App>, CoreError>;
}

pub fn select_source(name: &str) -> Result<Box<dyn PlatformSource>, CoreError> {
    match name.parse::<Platform>() {
        Ok(Platform::Steam) => Ok(Box::new(crate::steam::SteamSource::new())),
        Ok(Platform::BattleNet) => Ok(Box::new(crate::battlenet::BattleNetSource::new())),
        _ => Err(CoreError::UnknownSource(name.to_owned())),
    }
}

/// All supported platforms, in output order.
pub fn default_sources() -> Vec<Box<dyn PlatformSource>> {
    vec![
        Box::new(crate::steam::SteamSource::new()),
        Box::new(crate::battlenet::BattleNetSource::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_valid_sources() {
        assert_eq!(select_source("steam").unwrap().platform(), Platform::Steam);
        assert_eq!(
            select_source("battlenet").unwrap().platform(),
            Platform::BattleNet
        );
        assert_eq!(select_source("Battle.net").unwrap().name(), "Battle.net");
    }

    #[test]
    fn select_invalid_source_fails() {
        assert!(select_source("origin").is_err());
        assert!(select_source("none").is_err());
    }

    #[test]
    fn default_order_is_steam_then_battlenet() {
        let platforms: Vec<_> = default_sources().iter().map(|s| s.platform()).collect();
        assert_eq!(platforms, vec![Platform::Steam, Platform::BattleNet]);
    }

    #[test]
    fn nothing_is_installed_in_an_empty_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PrefixLayout::new(dir.path());
        assert!(default_sources().iter().all(|s| !s.is_installed(&layout)));
    }
}
