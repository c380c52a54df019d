//! Internationalization (i18n) data for the dashboard.
//!
//! # Architecture
//!
//! - `registry`: The supported locales and their display names
//! - `strings`: Built-in translation text per locale
//! - `table`: Immutable locale → translation map table with base-locale fallback
//! - `validator`: Table completeness and markup checks
//! - `metrics`: Counters for switches and silent degradations
//!
//! # Example
//!
//! ```rust
//! use leafcare_ui::i18n::LocaleTable;
//!
//! let table = LocaleTable::builtin();
//! let resolved = table.resolve("fr");
//! assert_eq!(resolved.code, "en");
//! assert!(resolved.fell_back);
//! ```

mod metrics;
mod registry;
mod strings;
mod table;
mod validator;

pub use metrics::{LocalizationMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use table::{LocaleTable, LocaleTableBuilder, Resolved, TranslationMap};
pub use validator::{TableValidator, ValidationReport, ALLOWED_INLINE_TAGS};
