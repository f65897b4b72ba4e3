//! Discovery of installed applications inside a Wine prefix.
//!
//! This crate ties the format parsers to the platforms that use them. Each
//! [`PlatformSource`] knows where its platform keeps its data inside a prefix
//! and turns that data into [`App`](cellar_schema::App) records; the
//! built-in Battle.net [`Catalog`] supplies what the agent database does not
//! (titles, executables, arguments). The [`Engine`] runs every source against
//! one prefix and collects apps and per-record [`Diagnostic`]s into a
//! [`DiscoveryReport`]. Discovery only reads the prefix.

pub mod battlenet;
pub mod catalog;
pub mod diagnostics;
pub mod engine;
pub mod layout;
pub mod source;
pub mod steam;

pub use battlenet::BattleNetSource;
pub use catalog::{Catalog, CatalogEntry, LegacyFallback, BUILTIN_BLACKLIST, BUILTIN_PRODUCTS};
pub use diagnostics::{Diagnostic, Diagnostics, DropReason};
pub use engine::{discover, DiscoveryOptions, DiscoveryReport, Engine, PlatformStatus};
pub use layout::{Hive, PrefixLayout};
pub use source::{default_sources, select_source, PlatformSource};
pub use steam::SteamSource;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("format error: {0}")]
    Format(#[from] cellar_formats::FormatError),
    #[error("config error: {0}")]
    Schema(#[from] cellar_schema::SchemaError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown platform source '{0}'")]
    UnknownSource(String),
}
