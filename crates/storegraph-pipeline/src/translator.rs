//! Category label translation

use std::collections::BTreeMap;

/// Maps category keys to display labels via a fixed table.
///
/// Pure, total lookup: unmapped keys pass through unchanged, so the
/// translator never fails.
#[derive(Debug, Clone, Default)]
pub struct LabelTranslator {
    map: BTreeMap<String, String>,
}

impl LabelTranslator {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Display label for a key
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.map.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn translate_owned(&self, key: &str) -> String {
        self.translate(key).to_string()
    }
}
