//! Windows path to host path translation inside a Wine prefix.
//!
//! `C:` maps to the prefix's `drive_c` directory; any other drive letter maps
//! to its `dosdevices/<letter>:` link, which is where Wine keeps drive
//! mappings. Backslashes and forward slashes are both accepted as separators.

use std::path::{Path, PathBuf};

/// True when `path` starts with a drive designator such as `C:` or `d:`.
pub fn has_drive_designator(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Translate a Windows absolute path to a host path under `prefix_root`.
///
/// Returns `None` for paths without a drive designator.
pub fn try_translate(prefix_root: &Path, windows_path: &str) -> Option<PathBuf> {
    if !has_drive_designator(windows_path) {
        return None;
    }
    let letter = windows_path.as_bytes()[0].to_ascii_lowercase() as char;
    let mut host = if letter == 'c' {
        prefix_root.join("drive_c")
    } else {
        prefix_root.join("dosdevices").join(format!("{letter}:"))
    };
    for segment in windows_path[2..]
        .split(['\\', '/'])
        .filter(|s| !s.is_empty())
    {
        host.push(segment);
    }
    Some(host)
}

/// Translate a Windows absolute path, passing paths without a drive
/// designator through unchanged. Whether such a path is usable is left to the
/// caller; an existence check on it simply fails.
pub fn translate(prefix_root: &Path, windows_path: &str) -> PathBuf {
    try_translate(prefix_root, windows_path).unwrap_or_else(|| PathBuf::from(windows_path))
}
