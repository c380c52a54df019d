//! Document port: the narrow view of a live page the controllers work against.
//!
//! Every controller in this crate reads and mutates the page only through the
//! [`Document`] trait. A browser host implements it over the real DOM; tests
//! and the preview binary use [`MemoryDocument`].
//!
//! # Architecture
//!
//! - `memory`: In-memory element tree implementing [`Document`] and [`ObjectUrls`]
//! - `dashboard`: Builds the standard dashboard markup into a [`MemoryDocument`]
//! - `web`: `WebDocument` over `web_sys::Document` (the `web` feature)

pub mod dashboard;
mod memory;
#[cfg(feature = "web")]
mod web;

pub use memory::{El, MemoryDocument};
#[cfg(feature = "web")]
pub use web::WebDocument;

use std::fmt;

/// Opaque handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a scroll-into-view request should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// What the host should do with the browser's default action for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    /// Let the default action (link navigation, form submit) proceed
    Allow,
    /// Equivalent of `preventDefault()`
    Prevent,
}

/// Operations the controllers need from a live document.
///
/// Query methods return elements in document order. Mutations on a handle that
/// no longer refers to an attached element are silently ignored, which keeps
/// every event handler free of existence checks beyond the lookups it does.
pub trait Document {
    /// Element with the given `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<ElementId>;

    /// Every element carrying attribute `name`, regardless of its value.
    fn find_by_attribute(&self, name: &str) -> Vec<ElementId>;

    /// Elements with class `class` inside `root` (the whole document when `None`).
    fn find_by_class(&self, root: Option<ElementId>, class: &str) -> Vec<ElementId>;

    /// Descendants of `root` with the given tag name.
    fn find_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId>;

    /// Lowercase tag name of an element.
    fn tag_name(&self, element: ElementId) -> Option<String>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Rendered text of the element and its descendants, markup stripped.
    fn text_content(&self, element: ElementId) -> Option<String>;

    /// Replace the element's children with a single plain text node.
    fn set_text_content(&mut self, element: ElementId, text: &str);

    /// Replace the element's children with parsed markup.
    fn set_inner_html(&mut self, element: ElementId, html: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Inline style property, e.g. `display`.
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Reset a form input so it no longer holds a selection or value.
    fn clear_input(&mut self, element: ElementId);

    /// Request a scroll; completion is never awaited.
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);
}

/// Temporary local references to user-selected files (`URL.createObjectURL`).
pub trait ObjectUrls {
    fn create_object_url(&mut self, file_name: &str) -> String;

    fn revoke_object_url(&mut self, url: &str);
}
