use cellar_schema::Platform;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Why a record did not become an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropReason {
    /// Required fields absent or empty.
    MissingFields { fields: Vec<&'static str> },
    /// Short code is on the catalog blacklist.
    Blacklisted,
    /// Neither the product id nor the short code is in the catalog.
    UnknownProduct,
    /// Manifest state is anything other than fully installed.
    NotInstalled { state_flags: Option<String> },
    /// SDK and redistributable entries, not games.
    InternalTool,
    InstallDirMissing { path: String },
    /// No candidate executable exists, fallbacks included.
    ExecutableMissing { title: String, tried: Vec<String> },
    LauncherMissing { path: String },
    /// A single manifest could not be read.
    Unreadable { error: String },
    /// The whole source failed, e.g. a corrupt product database.
    SourceFailed { error: String },
}

impl DropReason {
    /// Resolution failures mean a known title could not be located on disk.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::ExecutableMissing { .. })
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields { fields } => write!(f, "missing fields: {}", fields.join(", ")),
            Self::Blacklisted => f.write_str("blacklisted product"),
            Self::UnknownProduct => f.write_str("product not in catalog"),
            Self::NotInstalled { state_flags } => write!(
                f,
                "not fully installed (StateFlags {})",
                state_flags.as_deref().unwrap_or("absent")
            ),
            Self::InternalTool => f.write_str("internal tool"),
            Self::InstallDirMissing { path } => write!(f, "install directory missing: {path}"),
            Self::ExecutableMissing { title, tried } => {
                write!(f, "could not find executable for {title} (tried {})", tried.join(", "))
            }
            Self::LauncherMissing { path } => write!(f, "launcher missing: {path}"),
            Self::Unreadable { error } => write!(f, "unreadable: {error}"),
            Self::SourceFailed { error } => write!(f, "source failed: {error}"),
        }
    }
}

/// One dropped record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub platform: Platform,
    /// What was dropped: a manifest file name, a product id, or a source name.
    pub subject: String,
    pub reason: DropReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.platform.display_name(),
            self.subject,
            self.reason
        )
    }
}

/// Sink that sources report dropped records into.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, platform: Platform, subject: impl Into<String>, reason: DropReason) {
        let diagnostic = Diagnostic {
            platform,
            subject: subject.into(),
            reason,
        };
        match diagnostic.reason {
            DropReason::ExecutableMissing { .. } | DropReason::SourceFailed { .. } => {
                warn!("{diagnostic}");
            }
            _ => debug!("skipping {diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
