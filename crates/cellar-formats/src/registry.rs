//! Parser for Wine's text registry files (`system.reg`, `user.reg`) and
//! `regedit` exports.
//!
//! Key headers look like `[Software\\Wine\\Drivers] 1681234567`; the path
//! segments are separated by an escaped (doubled) backslash. Value lines look
//! like `"Name"=<data>`. Lookups use single backslashes: `Software\Wine`.

use crate::FormatError;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryValue {
    pub name: String,
    /// `string` for quoted data, `hex` or `str` for `hex:`/`str:` data, unset
    /// for anything else (`dword:`, `hex(2):`, bare words), whose data is kept
    /// verbatim.
    pub kind: Option<String>,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryKey {
    pub name: String,
    pub subkeys: HashMap<String, RegistryKey>,
    pub values: Vec<RegistryValue>,
}

impl RegistryKey {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// First value with the given name.
    pub fn value(&self, name: &str) -> Option<&RegistryValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// A registry tree parsed from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    root: RegistryKey,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            root: RegistryKey::named("Root"),
        }
    }
}

fn value_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^"(.*?)"=(.*)$"#).expect("valid value pattern"))
}

impl Registry {
    pub fn from_file(path: &Path) -> Result<Self, FormatError> {
        Ok(Self::parse_str(&crate::read_text(path)?))
    }

    /// Build the tree from export text. Malformed lines are skipped.
    pub fn parse_str(input: &str) -> Self {
        let mut registry = Self::default();
        let mut current: Vec<String> = Vec::new();

        for (lineno, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(end) = rest.find(']') else {
                    debug!("registry line {}: unterminated key header", lineno + 1);
                    continue;
                };
                let path: Vec<String> = rest[..end].split("\\\\").map(str::to_owned).collect();
                registry.key_mut(&path);
                current = path;
                continue;
            }

            let Some(caps) = value_line().captures(line) else {
                continue;
            };
            let value = parse_value(caps[1].trim(), caps[2].trim());
            registry.key_mut(&current).values.push(value);
        }

        registry
    }

    pub fn root(&self) -> &RegistryKey {
        &self.root
    }

    /// Walk a backslash-separated path from the root.
    pub fn get_key(&self, key_path: &str) -> Option<&RegistryKey> {
        key_path
            .split('\\')
            .try_fold(&self.root, |key, part| key.subkeys.get(part))
    }

    /// Convenience lookup of one value's data.
    pub fn get_value(&self, key_path: &str, name: &str) -> Option<&str> {
        self.get_key(key_path)?
            .value(name)
            .map(|v| v.data.as_str())
    }

    fn key_mut(&mut self, path: &[String]) -> &mut RegistryKey {
        let mut key = &mut self.root;
        for part in path {
            key = key
                .subkeys
                .entry(part.clone())
                .or_insert_with(|| RegistryKey::named(part));
        }
        key
    }
}

fn parse_value(name: &str, data: &str) -> RegistryValue {
    if data.starts_with("hex:") || data.starts_with("str:") {
        // Only a clean `tag:payload` pair is typed; anything with further
        // colons or an empty payload stays raw.
        let parts: Vec<&str> = data.split(':').filter(|p| !p.is_empty()).collect();
        let (kind, data) = match parts[..] {
            [kind, payload] => (Some(kind.trim().to_owned()), payload.trim()),
            _ => (None, data),
        };
        return RegistryValue {
            name: name.to_owned(),
            kind,
            data: data.to_owned(),
        };
    }
    if data.len() >= 2 && data.starts_with('"') && data.ends_with('"') {
        return RegistryValue {
            name: name.to_owned(),
            kind: Some("string".to_owned()),
            data: data[1..data.len() - 1].to_owned(),
        };
    }
    RegistryValue {
        name: name.to_owned(),
        kind: None,
        data: data.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM_REG: &str = r#"WINE REGISTRY Version 2
;; All keys relative to \\Machine

#arch=win64

[Software\\Blizzard Entertainment\\Battle.net\\Capabilities] 1681234567
#time=1d9a6c1e5e0f7a2
"ApplicationDescription"="Battle.net"
"ApplicationIcon"="\"C:\\Program Files (x86)\\Battle.net\\Battle.net.exe\",0"

[Software\\Wine\\Drivers] 1681234567
"Graphics"="mac,x11"
"Flags"=dword:00000001
"Blob"=hex:de,ad,be,ef
"Path"=str(2):"%SystemRoot%\\system32"
"Raw"=unquoted
"#;

    #[test]
    fn typed_hex_value() {
        let reg = Registry::parse_str("[Software\\\\Test]\n\"Foo\"=\"hex:1,2,3\"\n\"Bar\"=hex:1,2,3\n");
        let key = reg.get_key("Software\\Test").expect("key exists");
        // Quoted data is a string even when it looks typed.
        let foo = key.value("Foo").unwrap();
        assert_eq!(foo.kind.as_deref(), Some("string"));
        assert_eq!(foo.data, "hex:1,2,3");
        let bar = key.value("Bar").unwrap();
        assert_eq!(bar.kind.as_deref(), Some("hex"));
        assert_eq!(bar.data, "1,2,3");
    }

    #[test]
    fn single_hex_value_under_key() {
        let reg = Registry::parse_str("[Software\\\\Test]\n\"Foo\"=hex:1,2,3\n");
        let key = reg.get_key("Software\\Test").unwrap();
        assert_eq!(key.values.len(), 1);
        assert_eq!(key.values[0].name, "Foo");
        assert_eq!(key.values[0].kind.as_deref(), Some("hex"));
        assert_eq!(key.values[0].data, "1,2,3");
    }

    #[test]
    fn quoted_value_is_string() {
        let reg = Registry::parse_str(SYSTEM_REG);
        let v = reg
            .get_key("Software\\Wine\\Drivers")
            .unwrap()
            .value("Graphics")
            .unwrap();
        assert_eq!(v.kind.as_deref(), Some("string"));
        assert_eq!(v.data, "mac,x11");
    }

    #[test]
    fn only_hex_and_str_are_typed() {
        let reg = Registry::parse_str(SYSTEM_REG);
        let key = reg.get_key("Software\\Wine\\Drivers").unwrap();
        let flags = key.value("Flags").unwrap();
        assert!(flags.kind.is_none());
        assert_eq!(flags.data, "dword:00000001");
        let path = key.value("Path").unwrap();
        assert!(path.kind.is_none());
        assert_eq!(path.data, "str(2):\"%SystemRoot%\\\\system32\"");
        let blob = key.value("Blob").unwrap();
        assert_eq!(blob.kind.as_deref(), Some("hex"));
        assert_eq!(blob.data, "de,ad,be,ef");
    }

    #[test]
    fn malformed_typed_data_stays_raw() {
        let reg = Registry::parse_str(
            "[Software\\\\Test]\n\"Empty\"=hex:\n\"Wide\"=hex(2):41,00\n\"Drive\"=str:C:\\\\Games\n\"Text\"=str:abc\n",
        );
        let key = reg.get_key("Software\\Test").unwrap();
        let raw: Vec<_> = key
            .values
            .iter()
            .map(|v| (v.name.as_str(), v.kind.as_deref(), v.data.as_str()))
            .collect();
        assert_eq!(
            raw,
            vec![
                ("Empty", None, "hex:"),
                ("Wide", None, "hex(2):41,00"),
                ("Drive", None, "str:C:\\\\Games"),
                ("Text", Some("str"), "abc"),
            ]
        );
    }

    #[test]
    fn untyped_value_keeps_raw_data() {
        let reg = Registry::parse_str(SYSTEM_REG);
        let raw = reg.get_key("Software\\Wine\\Drivers").unwrap().value("Raw").unwrap();
        assert!(raw.kind.is_none());
        assert_eq!(raw.data, "unquoted");
    }

    #[test]
    fn trailing_timestamp_after_header_is_ignored() {
        let reg = Registry::parse_str(SYSTEM_REG);
        assert_eq!(
            reg.get_value(
                "Software\\Blizzard Entertainment\\Battle.net\\Capabilities",
                "ApplicationDescription"
            ),
            Some("Battle.net")
        );
    }

    #[test]
    fn intermediate_keys_are_created() {
        let reg = Registry::parse_str(SYSTEM_REG);
        let blizzard = reg.get_key("Software\\Blizzard Entertainment").unwrap();
        assert_eq!(blizzard.name, "Blizzard Entertainment");
        assert!(blizzard.values.is_empty());
        assert!(blizzard.subkeys.contains_key("Battle.net"));
        assert_eq!(reg.root().subkeys.len(), 1);
    }

    #[test]
    fn missing_path_is_none() {
        let reg = Registry::parse_str(SYSTEM_REG);
        assert!(reg.get_key("Software\\Valve").is_none());
        assert!(reg.get_key("Software\\Wine\\Drivers\\Deeper").is_none());
        assert!(reg.get_value("Software\\Wine\\Drivers", "Missing").is_none());
    }

    #[test]
    fn malformed_header_is_skipped() {
        let reg = Registry::parse_str(
            "[Software\\\\Good]\n\"A\"=\"1\"\n[Software\\\\Broken\n\"B\"=\"2\"\n",
        );
        assert!(reg.get_key("Software\\Broken").is_none());
        // The value after the broken header stays with the previous key.
        let good = reg.get_key("Software\\Good").unwrap();
        assert_eq!(good.values.len(), 2);
    }

    #[test]
    fn reopening_a_key_appends_values() {
        let reg = Registry::parse_str(
            "[Software\\\\A]\n\"x\"=\"1\"\n[Software\\\\B]\n[Software\\\\A]\n\"y\"=\"2\"\n",
        );
        let a = reg.get_key("Software\\A").unwrap();
        assert_eq!(a.values.len(), 2);
        assert_eq!(a.values[1].name, "y");
    }

    #[test]
    fn values_before_any_key_attach_to_root() {
        let reg = Registry::parse_str("\"Orphan\"=\"1\"\n[Software]\n\"Inner\"=\"2\"\n");
        assert_eq!(reg.root().values.len(), 1);
        assert_eq!(reg.root().value("Orphan").unwrap().data, "1");
        assert_eq!(reg.get_value("Software", "Inner"), Some("2"));
    }

    #[test]
    fn from_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::from_file(&dir.path().join("user.reg")).unwrap_err();
        assert!(matches!(err, FormatError::NotFound(_)));
    }
}
