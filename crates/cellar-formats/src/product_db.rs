//! Decoder for the Battle.net agent's `product.db`.
//!
//! The file is a protobuf message whose field 1 repeats once per installed
//! product. Only the fields needed to locate an install are declared:
//!
//! | field | meaning |
//! |---|---|
//! | 1 | product id (`wow`, `diablo3_enus`) |
//! | 2 | short product code (`wow`, `d3`) |
//! | 3 | install settings: 1 path, 2 region, 10 branch, 13 subfolder |
//! | 6 | product family |
//!
//! Undeclared fields are skipped by prost, so newer agent versions that add
//! fields still decode.

use crate::FormatError;
use prost::Message;
use std::path::Path;
use tracing::trace;

#[derive(Clone, PartialEq, Eq, Message)]
pub struct InstallSettings {
    #[prost(string, optional, tag = "1")]
    pub path: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub region: Option<String>,
    #[prost(string, optional, tag = "10")]
    pub branch: Option<String>,
    #[prost(string, optional, tag = "13")]
    pub subfolder: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Message)]
pub struct ProductRecord {
    #[prost(string, optional, tag = "1")]
    pub id: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub short_id: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub family: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub settings: Option<InstallSettings>,
}

impl ProductRecord {
    pub fn install_path(&self) -> Option<&str> {
        self.settings.as_ref()?.path.as_deref()
    }
}

/// The whole database: one repeated product field.
#[derive(Clone, PartialEq, Eq, Message)]
struct ProductDatabase {
    #[prost(message, repeated, tag = "1")]
    products: Vec<ProductRecord>,
}

pub fn read_product_db(path: &Path) -> Result<Vec<ProductRecord>, FormatError> {
    let bytes = crate::read_bytes(path)?;
    decode_products(&bytes)
}

/// Decode a whole database. A malformed record fails the whole stream: once
/// a length prefix is wrong there is no way to find the next record.
pub fn decode_products(bytes: &[u8]) -> Result<Vec<ProductRecord>, FormatError> {
    let db = ProductDatabase::decode(bytes)?;
    trace!("decoded {} product records", db.products.len());
    Ok(db.products)
}

/// Encode records the way the agent writes them. Used to build fixtures.
#[cfg(any(test, feature = "test-util"))]
pub fn encode_products(products: &[ProductRecord]) -> Vec<u8> {
    ProductDatabase {
        products: products.to_vec(),
    }
    .encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, short_id: &str, path: &str) -> ProductRecord {
        ProductRecord {
            id: Some(id.to_owned()),
            short_id: Some(short_id.to_owned()),
            family: None,
            settings: Some(InstallSettings {
                path: Some(path.to_owned()),
                region: Some("eu".to_owned()),
                ..InstallSettings::default()
            }),
        }
    }

    #[test]
    fn decodes_encoded_products() {
        let mut d3 = product("diablo3_enus", "d3", "C:\\Program Files (x86)\\Diablo III");
        d3.family = Some("diablo3".to_owned());
        let records = vec![product("wow", "wow", "C:\\Games\\WoW"), d3];
        let decoded = decode_products(&encode_products(&records)).unwrap();
        assert_eq!(decoded, records);
        assert_eq!(decoded[0].install_path(), Some("C:\\Games\\WoW"));
    }

    #[test]
    fn field_tags_match_agent_layout() {
        // product { id: "s2", short_id: "s2", settings { path: "C:\\SC2", branch: "enus" } }
        let bytes = [
            0x0a, 0x18, // field 1, 24 bytes
            0x0a, 0x02, b's', b'2', //
            0x12, 0x02, b's', b'2', //
            0x1a, 0x0e, // field 3, 14 bytes
            0x0a, 0x06, b'C', b':', b'\\', b'S', b'C', b'2', //
            0x52, 0x04, b'e', b'n', b'u', b's', // field 10
        ];
        let decoded = decode_products(&bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id.as_deref(), Some("s2"));
        assert_eq!(decoded[0].short_id.as_deref(), Some("s2"));
        let settings = decoded[0].settings.as_ref().unwrap();
        assert_eq!(settings.path.as_deref(), Some("C:\\SC2"));
        assert_eq!(settings.branch.as_deref(), Some("enus"));
        assert_eq!(settings.region, None);
    }

    #[test]
    fn empty_stream_has_no_products() {
        assert!(decode_products(&[]).unwrap().is_empty());
    }

    #[test]
    fn absent_fields_stay_none() {
        let records = vec![ProductRecord {
            id: Some("agent".to_owned()),
            ..ProductRecord::default()
        }];
        let decoded = decode_products(&encode_products(&records)).unwrap();
        assert_eq!(decoded[0].short_id, None);
        assert_eq!(decoded[0].install_path(), None);
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let mut bytes = vec![
            0x10, 0x96, 0x01, // field 2 varint 150
            0x1d, 1, 2, 3, 4, // field 3 fixed32
            0x21, 0, 0, 0, 0, 0, 0, 0, 0, // field 4 fixed64
            0x2a, 0x02, b'h', b'i', // field 5 bytes
        ];
        bytes.extend(encode_products(&[product("s2", "s2", "C:\\SC2")]));
        let decoded = decode_products(&bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id.as_deref(), Some("s2"));
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut bytes = encode_products(&[product("wow", "wow", "C:\\Games\\WoW")]);
        bytes.truncate(bytes.len() - 3);
        let err = decode_products(&bytes).unwrap_err();
        assert!(matches!(err, FormatError::Decode(_)));
        assert!(err.to_string().starts_with("malformed product database"));
    }

    #[test]
    fn malformed_streams_are_rejected() {
        let cases: [&[u8]; 4] = [
            &[0x0a, 0x80],                   // truncated length varint
            &[0xff; 11],                     // overlong varint
            &[0x02, 0x00],                   // field number zero
            &[0x0a, 0x03, 0x0a, 0x01, 0xff], // id is not UTF-8
        ];
        for bytes in cases {
            assert!(
                matches!(decode_products(bytes), Err(FormatError::Decode(_))),
                "{bytes:02x?}"
            );
        }
    }

    #[test]
    fn read_product_db_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.db");
        std::fs::write(&path, encode_products(&[product("pro", "pro", "C:\\OW")])).unwrap();
        let decoded = read_product_db(&path).unwrap();
        assert_eq!(decoded[0].short_id.as_deref(), Some("pro"));
        assert!(matches!(
            read_product_db(&dir.path().join("missing.db")),
            Err(FormatError::NotFound(_))
        ));
    }
}
