//! File formats read out of a Wine prefix.
//!
//! This crate holds the pure parsing layer: Windows-to-host path translation
//! (`winpath`), key scraping for Steam's `appmanifest_*.acf` files
//! (`keyvalues`), Wine's text registry exports (`registry`), and the
//! protobuf-encoded Battle.net agent database (`product_db`). Nothing here
//! knows which platform a file belongs to.

pub mod keyvalues;
pub mod product_db;
pub mod registry;
pub mod winpath;

pub use keyvalues::KeyValues;
pub use product_db::{decode_products, read_product_db, InstallSettings, ProductRecord};
pub use registry::{Registry, RegistryKey, RegistryValue};
pub use winpath::{has_drive_designator, translate, try_translate};

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("malformed product database: {0}")]
    Decode(#[from] prost::DecodeError),
}

fn not_found_or_io(path: &Path, e: std::io::Error) -> FormatError {
    if e.kind() == std::io::ErrorKind::NotFound {
        FormatError::NotFound(path.to_path_buf())
    } else {
        FormatError::Io(e)
    }
}

/// Read a whole text file, mapping a missing file to [`FormatError::NotFound`].
pub(crate) fn read_text(path: &Path) -> Result<String, FormatError> {
    std::fs::read_to_string(path).map_err(|e| not_found_or_io(path, e))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, FormatError> {
    std::fs::read(path).map_err(|e| not_found_or_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.acf");
        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, FormatError::NotFound(ref p) if *p == path));
        assert!(err.to_string().contains("absent.acf"));
    }

    #[test]
    fn decode_error_converts_with_context() {
        let err = decode_products(&[0x0a, 0x05]).unwrap_err();
        assert!(matches!(err, FormatError::Decode(_)));
        assert!(err.to_string().starts_with("malformed product database:"));
    }
}
