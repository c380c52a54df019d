//! Locale registry: the locales the dashboard ships translations for.
//!
//! The registry is static metadata (codes, display names, which locale is the
//! base). The translations themselves live in [`crate::i18n::LocaleTable`].

use std::sync::OnceLock;

/// Metadata for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale identifier as used in markup and URLs (e.g., "en", "hi")
    pub code: &'static str,

    /// English name (e.g., "Hindi")
    pub name: &'static str,

    /// Name in the locale's own script (e.g., "हिन्दी")
    pub native_name: &'static str,

    /// Whether this is the base locale unknown identifiers fall back to
    pub is_base: bool,

    /// Whether the built-in table includes this locale
    pub enabled: bool,
}

/// Registry of all known locales, initialized once on first access.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry, building it on first access.
    ///
    /// # Returns
    /// A `'static` reference shared by every caller in the process.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Look up a locale by code.
    ///
    /// # Arguments
    /// * `code` - Locale identifier as it appears in `data-lang` (e.g., "hi"); matched case-sensitively
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the registry knows the code
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all enabled locales.
    ///
    /// # Returns
    /// References to the locales with `enabled` set, in registry order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get the base locale.
    ///
    /// # Returns
    /// The single locale with `is_base` set.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one base locale.
    pub fn base(&self) -> &LocaleConfig {
        let base: Vec<_> = self.locales.iter().filter(|l| l.is_base).collect();

        match base.len() {
            0 => panic!("No base locale found in registry"),
            1 => base[0],
            _ => panic!("Multiple base locales found in registry"),
        }
    }
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_base: true,
            enabled: true,
        },
        LocaleConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            is_base: false,
            enabled: true,
        },
        LocaleConfig {
            code: "mr",
            name: "Marathi",
            native_name: "मराठी",
            is_base: false,
            enabled: true,
        },
    ]
}
