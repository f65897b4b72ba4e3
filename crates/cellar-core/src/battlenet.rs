//! Battle.net: installs are listed in the agent's `product.db`; the catalog
//! supplies how to launch each one.

use crate::catalog::Catalog;
use crate::diagnostics::{Diagnostics, DropReason};
use crate::layout::PrefixLayout;
use crate::source::PlatformSource;
use crate::CoreError;
use cellar_formats::{read_product_db, ProductRecord};
use cellar_schema::{App, AppId, Platform};
use tracing::debug;

pub const BATTLENET_CLIENT: &str = "C:\\Program Files (x86)\\Battle.net\\Battle.net.exe";
pub const PRODUCT_DB: &str = "C:\\ProgramData\\Battle.net\\Agent\\product.db";

#[derive(Debug, Default)]
pub struct BattleNetSource {
    catalog: Catalog,
}

impl BattleNetSource {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Turn one database record into an app, or report why not.
    pub fn resolve_product(
        &self,
        layout: &PrefixLayout,
        product: &ProductRecord,
        diagnostics: &mut Diagnostics,
    ) -> Option<App> {
        let (Some(id), Some(short_id), Some(install_path)) = (
            product.id.as_deref(),
            product.short_id.as_deref(),
            product.install_path(),
        ) else {
            let subject = product
                .id
                .clone()
                .or_else(|| product.short_id.clone())
                .unwrap_or_default();
            let fields = [
                ("id", product.id.is_none()),
                ("short_id", product.short_id.is_none()),
                ("install_path", product.install_path().is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect();
            diagnostics.record(
                Platform::BattleNet,
                subject,
                DropReason::MissingFields { fields },
            );
            return None;
        };

        if self.catalog.is_blacklisted(short_id) {
            diagnostics.record(Platform::BattleNet, id, DropReason::Blacklisted);
            return None;
        }

        let Some(entry) = self.catalog.resolve(id, short_id) else {
            diagnostics.record(Platform::BattleNet, id, DropReason::UnknownProduct);
            return None;
        };

        let install_dir = layout.translate(install_path);
        if !install_dir.is_dir() {
            diagnostics.record(
                Platform::BattleNet,
                id,
                DropReason::InstallDirMissing {
                    path: install_dir.display().to_string(),
                },
            );
            return None;
        }

        let mut tried = Vec::new();
        let executable = entry.executable_candidates().find_map(|relative| {
            let candidate = layout.translate_join(install_path, relative);
            if candidate.is_file() {
                Some(candidate)
            } else {
                tried.push(candidate.display().to_string());
                None
            }
        });
        let Some(executable) = executable else {
            diagnostics.record(
                Platform::BattleNet,
                id,
                DropReason::ExecutableMissing {
                    title: entry.title.to_owned(),
                    tried,
                },
            );
            return None;
        };

        Some(App {
            name: entry.title.to_owned(),
            install_dir: install_dir.to_string_lossy().into_owned(),
            executable_path: executable.to_string_lossy().into_owned(),
            arguments: entry.arguments.to_owned(),
            id: AppId::new(entry.family.unwrap_or(id)),
            platform: Platform::BattleNet,
        })
    }
}

impl PlatformSource for BattleNetSource {
    fn name(&self) -> &'static str {
        "Battle.net"
    }

    fn platform(&self) -> Platform {
        Platform::BattleNet
    }

    fn client_path(&self) -> &'static str {
        BATTLENET_CLIENT
    }

    fn installed_apps(
        &self,
        layout: &PrefixLayout,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<App>, CoreError> {
        let db_path = layout.translate(PRODUCT_DB);
        if !db_path.is_file() {
            debug!("no product database at {}", db_path.display());
            return Ok(Vec::new());
        }

        let products = read_product_db(&db_path)?;
        debug!("{} products in {}", products.len(), db_path.display());
        Ok(products
            .iter()
            .filter_map(|p| self.resolve_product(layout, p, diagnostics))
            .collect())
    }
}
