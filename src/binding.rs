//! Startup binding: read the markup once and turn its attributes into typed lists.
//!
//! The localization engine never queries the page for targets on its own; it
//! works from the [`Binding`]s and [`LocaleControl`]s produced here.

use crate::dom::{Document, ElementId};
use tracing::{debug, warn};

/// Attribute naming the translation key of a localization target.
pub const I18N_ATTR: &str = "data-i18n";

/// Attribute naming the locale a selector link switches to.
pub const LANG_ATTR: &str = "data-lang";

/// Class of the container holding the locale selector links.
pub const LANG_SELECT_CLASS: &str = "lang-select";

/// A localization target: an element and the key it displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub element: ElementId,
    pub key: String,
}

/// A locale selector link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleControl {
    pub element: ElementId,
    /// `None` when neither `data-lang` nor `href` name a locale; clicks on
    /// such a control are swallowed and ignored.
    pub locale: Option<String>,
}

/// Every element carrying a non-empty `data-i18n` key, in document order.
pub fn bind_targets<D: Document + ?Sized>(doc: &D) -> Vec<Binding> {
    let bindings: Vec<Binding> = doc
        .find_by_attribute(I18N_ATTR)
        .into_iter()
        .filter_map(|element| {
            let key = doc.attribute(element, I18N_ATTR)?;
            let key = key.trim();
            if key.is_empty() {
                debug!("Ignoring element {} with empty {}", element, I18N_ATTR);
                return None;
            }
            Some(Binding {
                element,
                key: key.to_string(),
            })
        })
        .collect();

    debug!("Bound {} localization targets", bindings.len());
    bindings
}

/// Every `.lang-select a` link with the locale it selects.
pub fn bind_locale_controls<D: Document + ?Sized>(doc: &D) -> Vec<LocaleControl> {
    let mut controls: Vec<LocaleControl> = Vec::new();

    for container in doc.find_by_class(None, LANG_SELECT_CLASS) {
        for element in doc.find_by_tag(container, "a") {
            if controls.iter().any(|c| c.element == element) {
                continue;
            }
            let locale = locale_of_control(doc, element);
            if locale.is_none() {
                warn!("Locale control {} names no locale", element);
            }
            controls.push(LocaleControl { element, locale });
        }
    }

    controls
}

/// Locale named by a selector link: `data-lang`, else the last `href` path segment.
pub fn locale_of_control<D: Document + ?Sized>(doc: &D, element: ElementId) -> Option<String> {
    let from_attr = doc
        .attribute(element, LANG_ATTR)
        .filter(|value| !value.is_empty());
    if from_attr.is_some() {
        return from_attr;
    }

    let href = doc.attribute(element, "href")?;
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
