//! Dictionary coverage validation.
//!
//! Compares a language's merged dictionary against the fallback dictionary:
//! keys the fallback has but the language lacks, keys the language has that
//! the fallback does not know about, and templates whose placeholders differ.

use crate::i18n::interpolate::placeholders;
use crate::i18n::Dictionary;
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Keys present in the fallback dictionary but missing here
    pub errors: Vec<String>,

    /// Extra keys and placeholder mismatches
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for dictionary coverage.
pub struct DictionaryValidator;

impl DictionaryValidator {
    /// Validate `candidate` against the `fallback` dictionary.
    pub fn validate(fallback: &Dictionary, candidate: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        let fallback_keys: BTreeSet<String> = fallback.keys().into_iter().collect();
        let candidate_keys: BTreeSet<String> = candidate.keys().into_iter().collect();

        for key in fallback_keys.difference(&candidate_keys) {
            report.errors.push(format!("Missing key: {}", key));
        }

        for key in candidate_keys.difference(&fallback_keys) {
            report
                .warnings
                .push(format!("Key not present in fallback dictionary: {}", key));
        }

        for key in fallback_keys.intersection(&candidate_keys) {
            let (Some(expected), Some(actual)) = (fallback.lookup(key), candidate.lookup(key))
            else {
                continue;
            };

            let expected: BTreeSet<String> = placeholders(&expected).into_iter().collect();
            let actual: BTreeSet<String> = placeholders(&actual).into_iter().collect();
            if expected != actual {
                report.warnings.push(format!(
                    "Placeholder mismatch in {}: fallback has {:?}, translation has {:?}",
                    key, expected, actual
                ));
            }
        }

        report
    }
}
