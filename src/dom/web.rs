//! [`Document`] and [`ObjectUrls`] over the live browser DOM.
//!
//! Elements are interned on first sight: every `web_sys::Element` a query
//! returns gets a stable [`ElementId`], and seeing the same node again yields
//! the same id.

use super::{Document, ElementId, ObjectUrls, ScrollBehavior};
use std::cell::RefCell;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, File, HtmlElement, HtmlInputElement, Node, NodeList, ScrollIntoViewOptions,
    ScrollLogicalPosition, Url,
};

/// Handle returned when the browser refuses to create an element. It never
/// resolves, so later mutations on it are ignored.
const UNCREATED: ElementId = ElementId(usize::MAX);

pub struct WebDocument {
    document: web_sys::Document,
    elements: RefCell<Vec<Element>>,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            elements: RefCell::new(Vec::new()),
        }
    }

    /// The document of the current window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// The DOM element behind a handle.
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.index()).cloned()
    }

    /// Handle for a DOM element, interning it if it is new.
    pub fn handle(&self, element: &Element) -> ElementId {
        let node: &Node = element;
        let mut elements = self.elements.borrow_mut();
        if let Some(index) = elements.iter().position(|known| known.is_same_node(Some(node))) {
            return ElementId::new(index);
        }
        elements.push(element.clone());
        ElementId::new(elements.len() - 1)
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn select(&self, root: Option<ElementId>, selector: &str) -> Vec<ElementId> {
        let list = match root {
            Some(root) => match self.element(root) {
                Some(root) => root.query_selector_all(selector),
                None => return Vec::new(),
            },
            None => self.document.query_selector_all(selector),
        };
        match list {
            Ok(list) => self.intern_all(&list),
            Err(e) => {
                debug!("Selector '{}' rejected: {}", selector, describe(&e));
                Vec::new()
            }
        }
    }

    fn intern_all(&self, list: &NodeList) -> Vec<ElementId> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.handle(&element))
            .collect()
    }

    /// A file currently selected in any file input of the page.
    fn selected_file(&self, name: &str) -> Option<File> {
        let inputs = self.document.query_selector_all("input[type=file]").ok()?;
        (0..inputs.length())
            .filter_map(|i| inputs.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .filter_map(|input| input.files())
            .flat_map(|files| (0..files.length()).filter_map(move |i| files.get(i)))
            .find(|file| file.name() == name)
    }
}

impl Document for WebDocument {
    fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.handle(&element))
    }

    fn find_by_attribute(&self, name: &str) -> Vec<ElementId> {
        self.select(None, &format!("[{}]", name))
    }

    fn find_by_class(&self, root: Option<ElementId>, class: &str) -> Vec<ElementId> {
        self.select(root, &format!(".{}", class))
    }

    fn find_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        self.select(Some(root), tag)
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.element(element)
            .map(|element| element.tag_name().to_ascii_lowercase())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(element) = self.element(element) {
            if let Err(e) = element.set_attribute(name, value) {
                debug!("Cannot set attribute '{}': {}", name, describe(&e));
            }
        }
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        let parent = self.element(element)?.parent_element()?;
        Some(self.handle(&parent))
    }

    fn text_content(&self, element: ElementId) -> Option<String> {
        self.element(element)?.text_content()
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.element(element) {
            element.set_text_content(Some(text));
        }
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) {
        if let Some(element) = self.element(element) {
            element.set_inner_html(html);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.html(element)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(element) = self.html(element) {
            if let Err(e) = element.style().set_property(property, value) {
                debug!("Cannot set style '{}': {}", property, describe(&e));
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        match self.document.create_element(tag) {
            Ok(element) => self.handle(&element),
            Err(e) => {
                debug!("Cannot create <{}>: {}", tag, describe(&e));
                UNCREATED
            }
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) else {
            return;
        };
        if let Err(e) = parent.append_child(&child) {
            debug!("Cannot append child: {}", describe(&e));
        }
    }

    fn clear_input(&mut self, element: ElementId) {
        if let Some(input) = self
            .element(element)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value("");
        }
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        let Some(element) = self.element(element) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

impl ObjectUrls for WebDocument {
    /// Object URL for the selected file called `file_name`; empty when no file
    /// input holds such a file.
    fn create_object_url(&mut self, file_name: &str) -> String {
        let Some(file) = self.selected_file(file_name) else {
            debug!("No selected file named '{}'", file_name);
            return String::new();
        };
        Url::create_object_url_with_blob(&file).unwrap_or_else(|e| {
            debug!("Cannot create object URL: {}", describe(&e));
            String::new()
        })
    }

    fn revoke_object_url(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Err(e) = Url::revoke_object_url(url) {
            debug!("Cannot revoke {}: {}", url, describe(&e));
        }
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
