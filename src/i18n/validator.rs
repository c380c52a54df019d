//! Locale table validation.
//!
//! Checks that every locale covers the base locale's keys and that translated
//! text only uses the small set of inline tags the dashboard renders as markup.

use crate::i18n::LocaleTable;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Inline tags translation text may contain.
pub const ALLOWED_INLINE_TAGS: &[&str] = &["a", "b", "br", "em", "i", "small", "span", "strong"];

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that leave page elements untranslated
    pub errors: Vec<String>,

    /// Suspicious content that still renders
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// `true` when the report has neither errors nor warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks a [`LocaleTable`] for coverage gaps and unexpected markup.
pub struct TableValidator;

static TAG_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Validate a whole table against its base locale.
    ///
    /// - A key present in the base locale but missing elsewhere is an error.
    /// - A key only some non-base locale defines is a warning.
    /// - A tag outside [`ALLOWED_INLINE_TAGS`] is a warning.
    ///
    /// # Arguments
    /// * `table` - The table to check; its base locale defines the expected keys
    ///
    /// # Returns
    /// A [`ValidationReport`] listing problems per locale. An empty report
    /// means the table is complete and only uses allowed inline tags.
    pub fn validate(table: &LocaleTable) -> ValidationReport {
        let mut report = ValidationReport::new();
        let base_keys: BTreeSet<&str> = table.base_map().iter().map(|(k, _)| k).collect();

        for code in table.locales() {
            let Some(map) = table.map(code) else {
                continue;
            };
            let keys: BTreeSet<&str> = map.iter().map(|(k, _)| k).collect();

            for missing in base_keys.difference(&keys) {
                report
                    .errors
                    .push(format!("Locale '{}' is missing key '{}'", code, missing));
            }
            for extra in keys.difference(&base_keys) {
                report.warnings.push(format!(
                    "Locale '{}' defines key '{}' unknown to base locale '{}'",
                    code,
                    extra,
                    table.base()
                ));
            }

            let mut entries: Vec<_> = map.iter().collect();
            entries.sort();
            for (key, text) in entries {
                for tag in Self::disallowed_tags(text) {
                    report.warnings.push(format!(
                        "Locale '{}' key '{}' uses disallowed tag <{}>",
                        code, key, tag
                    ));
                }
            }
        }

        report
    }

    /// Tag names in `text` that are not inline tags we allow.
    fn disallowed_tags(text: &str) -> Vec<String> {
        let regex =
            TAG_NAME_REGEX.get_or_init(|| Regex::new(r"</?\s*([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap());

        let mut tags: Vec<String> = regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_ascii_lowercase()))
            .filter(|tag| !ALLOWED_INLINE_TAGS.contains(&tag.as_str()))
            .collect();
        tags.dedup();
        tags
    }
}
