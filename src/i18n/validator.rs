//! Dataset validation.
//!
//! Checks the invariants a dataset document should hold (exactly one default
//! entry, unique codes) and flags descriptors that will not do what their
//! author probably meant. Validation never blocks a load; the loader logs the
//! report.

use crate::i18n::{Content, FieldKind, LanguageSet};
use std::collections::HashSet;

/// Validation report containing errors and warnings about a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Invariant violations
    pub errors: Vec<String>,

    /// Descriptors that will be ignored or coerced
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for language datasets.
pub struct DatasetValidator;

impl DatasetValidator {
    /// Validate a dataset.
    ///
    /// Errors:
    /// - no entry flagged as default
    /// - more than one entry flagged as default
    /// - duplicate language codes
    ///
    /// Warnings:
    /// - unknown field types
    /// - empty selectors
    /// - `select` content that is not a list
    /// - `disabled` content that is not a boolean
    pub fn validate(set: &LanguageSet) -> ValidationReport {
        let mut report = ValidationReport::new();

        let defaults: Vec<&str> = set
            .iter()
            .filter(|entry| entry.default)
            .map(|entry| entry.code.as_str())
            .collect();
        match defaults.len() {
            0 => report
                .errors
                .push("No language is flagged as default".to_string()),
            1 => {}
            _ => report.errors.push(format!(
                "Multiple languages flagged as default: {:?} (the first one is used)",
                defaults
            )),
        }

        let mut seen = HashSet::new();
        for entry in set.iter() {
            if !seen.insert(entry.code.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate language code '{}'", entry.code));
            }
        }

        for entry in set.iter() {
            for (key, descriptor) in entry.data.iter() {
                let location = format!("{}.{}", entry.code, key);

                if descriptor.selector.trim().is_empty() {
                    report
                        .warnings
                        .push(format!("{}: empty selector", location));
                }

                match (&descriptor.kind, &descriptor.content) {
                    (FieldKind::Unknown(tag), _) if tag.is_empty() => report
                        .warnings
                        .push(format!("{}: missing field type, will be ignored", location)),
                    (FieldKind::Unknown(tag), _) => report.warnings.push(format!(
                        "{}: unknown field type '{}' will be ignored",
                        location, tag
                    )),
                    (FieldKind::Select, Some(content)) if !matches!(content, Content::List(_)) => {
                        report.warnings.push(format!(
                            "{}: select content should be a list of labels",
                            location
                        ));
                    }
                    (FieldKind::Disabled, Some(content))
                        if !matches!(content, Content::Flag(_)) =>
                    {
                        report.warnings.push(format!(
                            "{}: disabled content should be a boolean",
                            location
                        ));
                    }
                    _ => {}
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(json: &str) -> ValidationReport {
        DatasetValidator::validate(&LanguageSet::from_json(json).expect("dataset should parse"))
    }

    #[test]
    fn test_clean_dataset() {
        let report = validate(
            r##"[
                {"code": "en", "lang": "English", "default": true,
                 "data": {"t": {"selector": "#t", "type": "text", "content": "Hi"},
                          "s": {"selector": "#s", "type": "select", "content": ["A"]},
                          "d": {"selector": "#d", "type": "disabled", "content": true}}},
                {"code": "fr", "lang": "Français", "default": false, "data": {}}
            ]"##,
        );
        assert!(report.is_clean(), "unexpected findings: {:?}", report);
    }

    #[test]
    fn test_missing_default() {
        let report = validate(r#"[{"code": "en", "lang": "English"}]"#);
        assert!(report.has_errors());
        assert!(report.errors[0].contains("default"));
    }

    #[test]
    fn test_multiple_defaults() {
        let report = validate(
            r#"[
                {"code": "en", "lang": "English", "default": true},
                {"code": "fr", "lang": "Français", "default": true}
            ]"#,
        );
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Multiple"));
    }

    #[test]
    fn test_duplicate_codes() {
        let report = validate(
            r#"[
                {"code": "en", "lang": "English", "default": true},
                {"code": "en", "lang": "English (US)"}
            ]"#,
        );
        assert_eq!(report.errors, vec!["Duplicate language code 'en'"]);
    }

    #[test]
    fn test_descriptor_warnings() {
        let report = validate(
            r##"[{"code": "en", "lang": "English", "default": true, "data": {
                "a": {"selector": "", "type": "text", "content": "x"},
                "b": {"selector": "#b", "type": "tooltip", "content": "x"},
                "c": {"selector": "#c", "type": "select", "content": "x"},
                "d": {"selector": "#d", "type": "disabled", "content": "yes"}
            }}]"##,
        );

        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 4);
        assert!(report.warnings[0].starts_with("en.a"));
        assert!(report.warnings[1].contains("tooltip"));
        assert!(report.warnings[2].contains("select"));
        assert!(report.warnings[3].contains("boolean"));
    }

    #[test]
    fn test_missing_type_warns() {
        let report = validate(
            r##"[{"code": "en", "lang": "English", "default": true, "data": {
                "note": {"selector": "#n", "content": "x"}
            }}]"##,
        );

        assert!(!report.has_errors());
        assert_eq!(report.warnings, vec!["en.note: missing field type, will be ignored"]);
    }

    #[test]
    fn test_report_default_is_clean() {
        assert!(ValidationReport::default().is_clean());
    }
}
