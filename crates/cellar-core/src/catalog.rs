//! Built-in Battle.net product catalog.
//!
//! The agent database records where a product is installed but not how to
//! launch it. This table fills that in. It is compiled in and never changes
//! at runtime; it is regenerated offline from Blizzard's version service.

/// An alternate executable tried when the primary one is missing.
///
/// Applies when the entry's primary executable path contains `contains`;
/// `executable` then replaces the whole relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyFallback {
    pub contains: &'static str,
    pub executable: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Lowercase product code the entry is keyed by.
    pub code: &'static str,
    pub title: &'static str,
    /// Executable relative to the install directory.
    pub executable: &'static str,
    pub arguments: &'static str,
    pub family: Option<&'static str>,
    pub fallbacks: &'static [LegacyFallback],
}

impl CatalogEntry {
    /// Relative executables to try, in order: the primary one, then every
    /// fallback whose pattern matches the primary path.
    pub fn executable_candidates(&self) -> impl Iterator<Item = &'static str> {
        let primary = self.executable;
        std::iter::once(primary).chain(
            self.fallbacks
                .iter()
                .filter(move |f| primary.contains(f.contains))
                .map(|f| f.executable),
        )
    }
}

/// Product table plus the short codes that are never offered as apps.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
    blacklist: &'static [&'static str],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub const fn new(
        entries: &'static [CatalogEntry],
        blacklist: &'static [&'static str],
    ) -> Self {
        Self { entries, blacklist }
    }

    pub const fn builtin() -> Self {
        Self::new(BUILTIN_PRODUCTS, BUILTIN_BLACKLIST)
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    /// Case-insensitive lookup by product code.
    pub fn lookup(&self, code: &str) -> Option<&'static CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.code.eq_ignore_ascii_case(code))
    }

    pub fn is_blacklisted(&self, short_id: &str) -> bool {
        self.blacklist
            .iter()
            .any(|b| b.eq_ignore_ascii_case(short_id))
    }

    /// Resolve a database record: full product id first, then short code.
    ///
    /// Newer agents key products by a regional id (`diablo3_enus`), older ones
    /// by the short code (`d3`), so both namespaces are tried.
    pub fn resolve(&self, id: &str, short_id: &str) -> Option<&'static CatalogEntry> {
        self.lookup(id).or_else(|| self.lookup(short_id))
    }
}

/// Short codes for the agent itself, the Battle.net app, and mobile
/// companions.
pub const BUILTIN_BLACKLIST: &[&str] = &["bna", "mobile", "agent"];

const fn entry(
    code: &'static str,
    title: &'static str,
    executable: &'static str,
    arguments: &'static str,
    family: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        code,
        title,
        executable,
        arguments,
        family: Some(family),
        fallbacks: &[],
    }
}

// Older releases shipped a launcher stub; newer ones only the game binary.
const WOW_FALLBACKS: &[LegacyFallback] = &[LegacyFallback {
    contains: "World of Warcraft Launcher.exe",
    executable: "WoW.exe",
}];

const OVERWATCH_FALLBACKS: &[LegacyFallback] = &[LegacyFallback {
    contains: "Overwatch Launcher.exe",
    executable: "Overwatch.exe",
}];

pub const BUILTIN_PRODUCTS: &[CatalogEntry] = &[
    entry("diablo3_enus", "Diablo III", "x64/Diablo III64.exe", "-launch", "D3"),
    entry("diablo3", "Diablo III", "x64/Diablo III64.exe", "-launch", "D3"),
    entry("d3cn", "Diablo III", "x64/Diablo III64.exe", "-launch", "D3CN"),
    entry(
        "anbs",
        "Diablo Immortal",
        "Engine/Binaries/Win64/DiabloImmortal.exe",
        "--dx11 --sound-api=wwise --start=Python",
        "ANBS",
    ),
    entry("d3", "Diablo III", "x64/Diablo III64.exe", "-launch", "D3"),
    entry("fenris", "Diablo IV", "Diablo IV Launcher.exe", "", "Fen"),
    entry(
        "hero",
        "Heroes of the Storm",
        "Support64/HeroesSwitcher_x64.exe",
        "-launch",
        "Hero",
    ),
    entry("hsb", "Hearthstone", "Hearthstone.exe", "-launch", "HSB"),
    entry(
        "lazr",
        "Call of Duty Modern Warfare 2 Campaign Remastered",
        "MW2CR.exe",
        "",
        "LAZR",
    ),
    entry(
        "odin",
        "Call of Duty Modern Warfare",
        "bootstrapper.exe",
        "ModernWarfare.exe",
        "ODIN",
    ),
    entry("osi", "Diablo II Resurrected", "D2R.exe", "", "OSI"),
    CatalogEntry {
        fallbacks: OVERWATCH_FALLBACKS,
        ..entry("pro", "Overwatch", "Overwatch.exe", "", "PRO")
    },
    entry("rtro", "Blizzard Arcade Collection", "client.exe", "", "RTRO"),
    entry("s1", "StarCraft", "x86_64/StarCraft.exe", "-launch", "S1"),
    entry("s2", "StarCraft II", "Support64/SC2Switcher_x64.exe", "-launch", "S2"),
    entry("viper", "Call of Duty Black Ops 4", "BlackOps4_boot.exe", "", "VIPER"),
    entry("w3", "Warcraft III", "x86_64/Warcraft III.exe", "-launch", "W3"),
    entry("wlby", "Crash Bandicoot 4", "CrashBandicoot4.exe", "", "WLBY"),
    CatalogEntry {
        fallbacks: WOW_FALLBACKS,
        ..entry("wow", "World of Warcraft", "WoW.exe", "", "WoW")
    },
    entry(
        "wow_classic",
        "Burning Crusade Classic",
        "WoWClassic.exe",
        "",
        "WoWC",
    ),
];
