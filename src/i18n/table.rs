//! The locale table: locale → (key → display text).
//!
//! Built once at startup and shared read-only for the lifetime of the page.

use crate::error::TableError;
use crate::i18n::{strings, LocaleRegistry};
use std::collections::{BTreeMap, HashMap};

/// Key → display text for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: HashMap<String, String>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TranslationMap::new();
        for (key, text) in iter {
            map.insert(key, text);
        }
        map
    }
}

/// Outcome of resolving a requested locale identifier against a table.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// Locale actually used
    pub code: &'a str,
    pub map: &'a TranslationMap,
    /// `true` when the requested identifier was unknown and the base locale was used
    pub fell_back: bool,
}

/// Immutable set of translation maps with a designated base locale.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    base: String,
    locales: BTreeMap<String, TranslationMap>,
}

impl LocaleTable {
    pub fn builder(base: impl Into<String>) -> LocaleTableBuilder {
        LocaleTableBuilder {
            base: base.into(),
            locales: BTreeMap::new(),
        }
    }

    /// The table shipped with the dashboard: every enabled registry locale.
    pub fn builtin() -> LocaleTable {
        let registry = LocaleRegistry::get();
        let mut builder = LocaleTable::builder(registry.base().code);
        for config in registry.list_enabled() {
            if let Some(strings) = strings::strings_for(config.code) {
                builder = builder.locale(config.code, strings.iter().copied());
            }
        }
        builder
            .build()
            .expect("built-in strings always define the base locale")
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn base_map(&self) -> &TranslationMap {
        // Presence of the base map is checked by the builder.
        &self.locales[&self.base]
    }

    pub fn contains(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    pub fn map(&self, code: &str) -> Option<&TranslationMap> {
        self.locales.get(code)
    }

    /// Locale codes in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Resolve `code`, substituting the base locale for unknown identifiers.
    pub fn resolve(&self, code: &str) -> Resolved<'_> {
        match self.locales.get_key_value(code) {
            Some((code, map)) => Resolved {
                code: code.as_str(),
                map,
                fell_back: false,
            },
            None => Resolved {
                code: &self.base,
                map: self.base_map(),
                fell_back: true,
            },
        }
    }
}

pub struct LocaleTableBuilder {
    base: String,
    locales: BTreeMap<String, TranslationMap>,
}

impl LocaleTableBuilder {
    /// Add (or extend) the translation map for `code`.
    pub fn locale<K, V>(mut self, code: &str, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = self.locales.entry(code.to_string()).or_default();
        for (key, text) in entries {
            map.insert(key, text);
        }
        self
    }

    pub fn build(self) -> Result<LocaleTable, TableError> {
        if self.locales.keys().any(|code| code.is_empty()) {
            return Err(TableError::EmptyLocale);
        }
        if !self.locales.contains_key(&self.base) {
            return Err(TableError::MissingBaseLocale(self.base));
        }
        Ok(LocaleTable {
            base: self.base,
            locales: self.locales,
        })
    }
}
