use cellar_formats::winpath;
use std::fmt;
use std::path::{Path, PathBuf};

/// Registry hives Wine keeps as text files at the prefix root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hive {
    System,
    User,
    UserDefault,
}

impl Hive {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::System => "system.reg",
            Self::User => "user.reg",
            Self::UserDefault => "userdef.reg",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "system" | "system.reg" | "HKLM" => Some(Self::System),
            "user" | "user.reg" | "HKCU" => Some(Self::User),
            "userdef" | "userdef.reg" => Some(Self::UserDefault),
            _ => None,
        }
    }
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Directory layout of a Wine prefix.
///
/// The prefix root is assumed to exist; callers validate it. Every other
/// path may be missing.
#[derive(Debug, Clone)]
pub struct PrefixLayout {
    root: PathBuf,
}

impl PrefixLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn drive_c(&self) -> PathBuf {
        self.root.join("drive_c")
    }

    #[inline]
    pub fn hive(&self, hive: Hive) -> PathBuf {
        self.root.join(hive.file_name())
    }

    /// Host path for a Windows path inside this prefix.
    #[inline]
    pub fn translate(&self, windows_path: &str) -> PathBuf {
        winpath::translate(&self.root, windows_path)
    }

    pub fn file_exists(&self, windows_path: &str) -> bool {
        self.translate(windows_path).is_file()
    }

    pub fn dir_exists(&self, windows_path: &str) -> bool {
        self.translate(windows_path).is_dir()
    }

    /// Host path of `relative` under `dir`. A `dir` without a drive letter is
    /// already a host path and is joined as-is.
    pub fn translate_join(&self, dir: &str, relative: &str) -> PathBuf {
        if winpath::has_drive_designator(dir) {
            return self.translate(&windows_join(dir, relative));
        }
        relative
            .split(['\\', '/'])
            .filter(|part| !part.is_empty())
            .fold(PathBuf::from(dir), |path, part| path.join(part))
    }
}

/// Join a relative path onto a Windows directory path.
fn windows_join(dir: &str, relative: &str) -> String {
    format!("{}\\{}", dir.trim_end_matches(['\\', '/']), relative)
}
