//! In-memory element tree.
//!
//! Markup assigned through `set_inner_html` is kept verbatim and is not parsed
//! into child elements; its text (tags stripped) is what `text_content` reports.

use super::{Document, ElementId, ObjectUrls, ScrollBehavior};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn strip_tags(markup: &str) -> String {
    let regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    regex.replace_all(markup, "").into_owned()
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    markup: Option<String>,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            text: String::new(),
            markup: None,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Declarative description of an element to append to a [`MemoryDocument`].
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    text: Option<String>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.push((property.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

/// A page held entirely in memory, rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    scrolls: Vec<(ElementId, ScrollBehavior)>,
    live_urls: BTreeSet<String>,
    next_blob: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
            scrolls: Vec::new(),
            live_urls: BTreeSet::new(),
            next_blob: 0,
        }
    }

    pub fn body(&self) -> ElementId {
        ElementId::new(0)
    }

    /// Create the element described by `el` and attach it under `parent`.
    pub fn append(&mut self, parent: ElementId, el: El) -> ElementId {
        let element = self.create_element(&el.tag);
        for (name, value) in &el.attributes {
            self.set_attribute(element, name, value);
        }
        for class in &el.classes {
            self.add_class(element, class);
        }
        for (property, value) in &el.styles {
            self.set_style(element, property, value);
        }
        if let Some(text) = &el.text {
            self.set_text_content(element, text);
        }
        self.append_child(parent, element);
        element
    }

    /// Raw markup last assigned with `set_inner_html`, if the element still holds it.
    pub fn inner_html(&self, element: ElementId) -> Option<&str> {
        self.node(element)?.markup.as_deref()
    }

    /// Attached children of an element, in order.
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Every scroll request issued so far.
    pub fn scroll_log(&self) -> &[(ElementId, ScrollBehavior)] {
        &self.scrolls
    }

    /// Object URLs created and not yet revoked.
    pub fn live_object_urls(&self) -> Vec<String> {
        self.live_urls.iter().cloned().collect()
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == self.body() {
                return true;
            }
            current = self.node(id).and_then(|node| node.parent);
        }
        false
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.index())
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.index())
    }

    /// Descendants of `root` in document order, `root` excluded.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// Body plus all its descendants.
    fn all_elements(&self) -> Vec<ElementId> {
        let mut out = vec![self.body()];
        out.extend(self.descendants(self.body()));
        out
    }

    fn detach_children(&mut self, element: ElementId) {
        let children = match self.node_mut(element) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
        }
    }
}

impl Document for MemoryDocument {
    fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.all_elements()
            .into_iter()
            .find(|el| self.attribute(*el, "id").as_deref() == Some(id))
    }

    fn find_by_attribute(&self, name: &str) -> Vec<ElementId> {
        self.all_elements()
            .into_iter()
            .filter(|el| self.attribute(*el, name).is_some())
            .collect()
    }

    fn find_by_class(&self, root: Option<ElementId>, class: &str) -> Vec<ElementId> {
        let candidates = match root {
            Some(root) => self.descendants(root),
            None => self.all_elements(),
        };
        candidates
            .into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }

    fn find_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        let tag = tag.to_ascii_lowercase();
        self.descendants(root)
            .into_iter()
            .filter(|el| self.node(*el).is_some_and(|node| node.tag == tag))
            .collect()
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.node(element).map(|node| node.tag.clone())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = self.node(element)?;
        if name == "class" {
            if node.classes.is_empty() {
                return None;
            }
            return Some(node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element)?.parent
    }

    fn text_content(&self, element: ElementId) -> Option<String> {
        let node = self.node(element)?;
        let mut text = node.text.clone();
        for child in &node.children {
            if let Some(child_text) = self.text_content(*child) {
                text.push_str(&child_text);
            }
        }
        Some(text)
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        self.detach_children(element);
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_string();
            node.markup = None;
        }
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) {
        self.detach_children(element);
        if let Some(node) = self.node_mut(element) {
            node.text = strip_tags(html);
            node.markup = Some(html.to_string());
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.node(element)?.style.get(property).cloned()
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId::new(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        if let Some(old_parent) = self.parent(child) {
            if let Some(node) = self.node_mut(old_parent) {
                node.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.markup = None;
            node.children.push(child);
        }
    }

    fn clear_input(&mut self, element: ElementId) {
        self.set_attribute(element, "value", "");
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        if self.is_attached(element) {
            self.scrolls.push((element, behavior));
        }
    }
}

impl ObjectUrls for MemoryDocument {
    fn create_object_url(&mut self, file_name: &str) -> String {
        self.next_blob += 1;
        let url = format!("blob:memory/{}/{}", self.next_blob, file_name);
        self.live_urls.insert(url.clone());
        url
    }

    fn revoke_object_url(&mut self, url: &str) {
        self.live_urls.remove(url);
    }
}
