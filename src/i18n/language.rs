//! Language entries and the dataset that holds them.
//!
//! Resolution is a first-match scan over the in-memory set; it never touches
//! the cache or the network.

use crate::error::LanguageError;
use crate::i18n::FieldMap;
use serde::{Deserialize, Serialize};

/// One language: its code, display name, default flag and field descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Unique identifier (e.g., "en", "fr")
    pub code: String,

    /// Human-readable name (e.g., "English", "Français")
    pub lang: String,

    /// Whether this entry is applied automatically after a load
    #[serde(default)]
    pub default: bool,

    #[serde(default)]
    pub data: FieldMap,
}

/// Ordered collection of language entries, as loaded from the dataset document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageSet {
    entries: Vec<LanguageEntry>,
}

impl LanguageSet {
    pub fn new(entries: Vec<LanguageEntry>) -> Self {
        Self { entries }
    }

    /// Parse a dataset document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize back to the dataset document shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The first entry flagged as default.
    ///
    /// # Errors
    /// `LanguageError::DefaultNotFound` if no entry carries the flag.
    pub fn resolve_default(&self) -> Result<&LanguageEntry, LanguageError> {
        self.entries
            .iter()
            .find(|entry| entry.default)
            .ok_or(LanguageError::DefaultNotFound)
    }

    /// The first entry with the given code.
    ///
    /// # Errors
    /// `LanguageError::NotFound` if no entry has that code.
    pub fn resolve_by_code(&self, code: &str) -> Result<&LanguageEntry, LanguageError> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .ok_or_else(|| LanguageError::NotFound {
                code: code.to_string(),
            })
    }

    /// Language codes in dataset order.
    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.code.clone()).collect()
    }

    /// Display names in dataset order, parallel to [`LanguageSet::codes`].
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.lang.clone()).collect()
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> LanguageSet {
        LanguageSet::from_json(
            r##"[
                {"code": "en", "lang": "English", "default": true,
                 "data": {"title": {"selector": "#t", "type": "text", "content": "Hello"}}},
                {"code": "fr", "lang": "Français", "default": false,
                 "data": {"title": {"selector": "#t", "type": "text", "content": "Bonjour"}}}
            ]"##,
        )
        .expect("sample dataset should parse")
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_resolve_default() {
        let set = sample_set();
        let entry = set.resolve_default().unwrap();
        assert_eq!(entry.code, "en");
        assert_eq!(entry.lang, "English");
    }

    #[test]
    fn test_resolve_default_missing() {
        let set = LanguageSet::from_json(
            r#"[{"code": "en", "lang": "English", "default": false, "data": {}}]"#,
        )
        .unwrap();
        assert_eq!(
            set.resolve_default().unwrap_err(),
            LanguageError::DefaultNotFound
        );
    }

    #[test]
    fn test_resolve_default_on_empty_set() {
        let set = LanguageSet::default();
        assert!(set.resolve_default().is_err());
    }

    #[test]
    fn test_resolve_default_takes_first_flagged() {
        let set = LanguageSet::from_json(
            r#"[
                {"code": "a", "lang": "A", "default": false},
                {"code": "b", "lang": "B", "default": true},
                {"code": "c", "lang": "C", "default": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(set.resolve_default().unwrap().code, "b");
    }

    #[test]
    fn test_resolve_by_code() {
        let set = sample_set();
        assert_eq!(set.resolve_by_code("fr").unwrap().lang, "Français");
    }

    #[test]
    fn test_resolve_by_code_missing() {
        let set = sample_set();
        let err = set.resolve_by_code("de").unwrap_err();
        assert_eq!(
            err,
            LanguageError::NotFound {
                code: "de".to_string()
            }
        );
        assert_eq!(err.to_string(), "Language not found");
    }

    // ==================== Query Tests ====================

    #[test]
    fn test_codes_and_names_are_parallel() {
        let set = sample_set();
        assert_eq!(set.codes(), vec!["en", "fr"]);
        assert_eq!(set.names(), vec!["English", "Français"]);
    }

    #[test]
    fn test_missing_default_flag_and_data() {
        let set = LanguageSet::from_json(r#"[{"code": "en", "lang": "English"}]"#).unwrap();
        let entry = &set.entries()[0];
        assert!(!entry.default);
        assert!(entry.data.is_empty());
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let set = sample_set();
        let json = set.to_json().unwrap();
        let restored = LanguageSet::from_json(&json).unwrap();
        assert_eq!(set, restored);
    }

    #[test]
    fn test_rejects_non_array_document() {
        assert!(LanguageSet::from_json(r#"{"code": "en"}"#).is_err());
    }
}
