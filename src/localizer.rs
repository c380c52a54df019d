//! Localization engine: relabels the bound page elements into a chosen locale.
//!
//! The engine owns the active locale. A switch runs three steps in order:
//! apply the locale to every target, move the `active` class to the matching
//! selector link, then fire the server notification without waiting for it.
//! Initialization runs the first two steps only, since the server already
//! rendered the page in its own locale.

use crate::binding::{self, Binding, LocaleControl};
use crate::dom::{DefaultAction, Document, ElementId};
use crate::i18n::{LocaleTable, LocalizationMetrics};
use crate::notify::{LocaleNotifier, NotifyHandle};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Class marking the selector link of the active locale.
pub const ACTIVE_CLASS: &str = "active";

/// Element kinds that may receive translation text as markup.
pub const RICH_CONTENT_TAGS: &[&str] = &["a", "div", "span"];

static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether `text` contains anything that looks like a tag.
pub fn contains_markup(text: &str) -> bool {
    MARKUP_REGEX
        .get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
        .is_match(text)
}

/// What one `apply_locale` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Identifier the caller asked for
    pub requested: String,
    /// Locale whose texts were applied
    pub applied: String,
    pub fell_back: bool,
    /// Targets whose content was replaced
    pub updated: usize,
    /// Targets left untouched because the key has no text in `applied`
    pub missing: usize,
}

pub struct LocalizationEngine {
    table: Arc<LocaleTable>,
    targets: Vec<Binding>,
    controls: Vec<LocaleControl>,
    active_locale: String,
    notifier: Arc<dyn LocaleNotifier>,
    metrics: Arc<LocalizationMetrics>,
}

impl LocalizationEngine {
    pub fn new(
        table: Arc<LocaleTable>,
        targets: Vec<Binding>,
        controls: Vec<LocaleControl>,
        notifier: Arc<dyn LocaleNotifier>,
        metrics: Arc<LocalizationMetrics>,
    ) -> Self {
        let active_locale = table.base().to_string();
        Self {
            table,
            targets,
            controls,
            active_locale,
            notifier,
            metrics,
        }
    }

    /// Bind targets and selector links from `doc`.
    pub fn bind<D: Document + ?Sized>(
        doc: &D,
        table: Arc<LocaleTable>,
        notifier: Arc<dyn LocaleNotifier>,
        metrics: Arc<LocalizationMetrics>,
    ) -> Self {
        Self::new(
            table,
            binding::bind_targets(doc),
            binding::bind_locale_controls(doc),
            notifier,
            metrics,
        )
    }

    pub fn active_locale(&self) -> &str {
        &self.active_locale
    }

    pub fn targets(&self) -> &[Binding] {
        &self.targets
    }

    pub fn controls(&self) -> &[LocaleControl] {
        &self.controls
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    pub fn metrics(&self) -> &LocalizationMetrics {
        &self.metrics
    }

    /// Apply the server-rendered locale once at load. No notification is sent.
    pub fn initialize<D: Document + ?Sized>(&mut self, doc: &mut D, hint: Option<&str>) -> ApplyReport {
        let hint = hint.unwrap_or(self.table.base()).to_string();
        let report = self.apply_locale(doc, &hint);
        self.set_active_locale_indicator(doc, &report.applied);
        info!(
            "Localization initialized in '{}' ({} targets, {} controls)",
            report.applied,
            self.targets.len(),
            self.controls.len()
        );
        report
    }

    /// Relabel every bound target into `locale`.
    ///
    /// Unknown identifiers use the base locale. Targets whose key has no text
    /// in the resolved locale keep their current content.
    pub fn apply_locale<D: Document + ?Sized>(&mut self, doc: &mut D, locale: &str) -> ApplyReport {
        let resolved = self.table.resolve(locale);
        if resolved.fell_back {
            debug!(
                "Unknown locale '{}', using base locale '{}'",
                locale, resolved.code
            );
            self.metrics.record_fallback();
        }

        let mut updated = 0;
        let mut missing = 0;
        for target in &self.targets {
            let Some(text) = resolved.map.get(&target.key) else {
                debug!(
                    "No '{}' text for key '{}', leaving {} as is",
                    resolved.code, target.key, target.element
                );
                missing += 1;
                continue;
            };
            assign_text(doc, target.element, text);
            updated += 1;
        }

        let report = ApplyReport {
            requested: locale.to_string(),
            applied: resolved.code.to_string(),
            fell_back: resolved.fell_back,
            updated,
            missing,
        };

        self.active_locale = report.applied.clone();
        self.metrics.record_locale_applied();
        self.metrics.record_missing_keys(missing);
        report
    }

    /// Put [`ACTIVE_CLASS`] on the selector links for `locale` and remove it from the rest.
    ///
    /// `locale` is resolved against the table first, so an unknown identifier
    /// marks the base locale's links.
    pub fn set_active_locale_indicator<D: Document + ?Sized>(&self, doc: &mut D, locale: &str) {
        let locale = self.table.resolve(locale).code;
        for control in &self.controls {
            if control.locale.as_deref() == Some(locale) {
                doc.add_class(control.element, ACTIVE_CLASS);
            } else {
                doc.remove_class(control.element, ACTIVE_CLASS);
            }
        }
    }

    /// Tell the server about the new locale. Never blocks; the outcome is not reported.
    pub fn notify_server(&self, locale: &str) -> NotifyHandle {
        self.notifier.notify(locale)
    }

    /// The full switch: apply, mark the selector, notify.
    pub fn select_locale<D: Document + ?Sized>(&mut self, doc: &mut D, locale: &str) -> NotifyHandle {
        let report = self.apply_locale(doc, locale);
        self.set_active_locale_indicator(doc, &report.applied);
        info!(
            "Locale switched to '{}' ({} updated, {} missing)",
            report.applied, report.updated, report.missing
        );
        self.notify_server(locale)
    }

    /// Click handler for selector links.
    ///
    /// Returns [`DefaultAction::Allow`] for elements that are not selector links.
    pub fn on_locale_control_activated<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        element: ElementId,
    ) -> DefaultAction {
        let Some(control) = self.controls.iter().find(|c| c.element == element) else {
            return DefaultAction::Allow;
        };

        if let Some(locale) = control.locale.clone() {
            // Dropping the handle detaches the notification.
            let _ = self.select_locale(doc, &locale);
        }
        DefaultAction::Prevent
    }
}

/// Markup only for container-like elements; everything else gets plain text.
fn assign_text<D: Document + ?Sized>(doc: &mut D, element: ElementId, text: &str) {
    let rich_kind = doc
        .tag_name(element)
        .is_some_and(|tag| RICH_CONTENT_TAGS.contains(&tag.as_str()));

    if rich_kind && contains_markup(text) {
        doc.set_inner_html(element, text);
    } else {
        doc.set_text_content(element, text);
    }
}
