//! Translation data before and after assembly.

use crate::i18n::LanguageCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The raw translation definitions exported by one `translations.*` file.
///
/// The structure is an arbitrary JSON object tree; only an assembler gives it
/// meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTranslationSource(Map<String, Value>);

impl RawTranslationSource {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Top-level entries of the source.
    pub fn entries(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawTranslationSource {
    fn from(entries: Map<String, Value>) -> Self {
        Self(entries)
    }
}

/// Fully assembled, request-ready translations for one language.
///
/// Keys are flat (e.g. `nav.home`) and values are the display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationDictionary {
    language: LanguageCode,
    entries: BTreeMap<String, String>,
}

impl TranslationDictionary {
    pub fn new(language: LanguageCode, entries: BTreeMap<String, String>) -> Self {
        Self { language, entries }
    }

    /// The language these translations are written in.
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Look up the text for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
