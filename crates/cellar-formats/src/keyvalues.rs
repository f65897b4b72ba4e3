//! Key scraping for Valve's KeyValues text format (`.acf`, `.vdf`).
//!
//! The format nests `"key" "value"` pairs inside braces. Only a handful of
//! scalar fields are ever needed, so the text is not parsed structurally: a
//! lookup returns the first `"key" "value"` pair anywhere in the file. A key
//! repeated inside a nested block earlier in the file shadows a later
//! top-level one.

use crate::FormatError;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// Raw KeyValues text with lookup by key name.
#[derive(Debug, Clone)]
pub struct KeyValues {
    content: String,
}

impl KeyValues {
    pub fn from_file(path: &Path) -> Result<Self, FormatError> {
        Ok(Self::from_text(crate::read_text(path)?))
    }

    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// First value for `key` (case-sensitive), with escape sequences resolved.
    pub fn get(&self, key: &str) -> Option<String> {
        let pattern = format!(
            r#""{}"\s+(?:"((?:[^"\\]|\\.)*)"|([^\s"{{}}]+))"#,
            regex::escape(key)
        );
        // The pattern is built from an escaped key, so it always compiles.
        let re = Regex::new(&pattern).ok()?;
        let caps = re.captures(&self.content)?;
        caps.get(1)
            .map(|m| unescape(m.as_str()))
            .or_else(|| caps.get(2).map(|m| m.as_str().to_owned()))
    }

    /// Look up several keys at once; absent keys are left out of the map.
    pub fn fields(&self, keys: &[&str]) -> BTreeMap<String, String> {
        keys.iter()
            .filter_map(|k| self.get(k).map(|v| ((*k).to_owned(), v)))
            .collect()
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
