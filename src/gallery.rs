//! Gallery interaction controller.
//!
//! Clicking a recent-upload entry toggles the "all images" panel. Opening it
//! highlights the thumbnail of the clicked image and scrolls the panel into
//! view; closing it leaves the highlight alone. The "view all" link always
//! opens the panel.

use crate::dom::{DefaultAction, Document, ElementId, ScrollBehavior};
use crate::error::BindError;
use tracing::debug;

pub const HISTORY_LIST_ID: &str = "historyList";
pub const GALLERY_WRAP_ID: &str = "allGalleryWrap";
pub const GALLERY_ID: &str = "allGallery";
pub const HISTORY_ITEM_CLASS: &str = "history-item";
pub const VIEW_ALL_CLASS: &str = "view-all-link";
pub const THUMB_CLASS: &str = "gallery-thumb";

/// Attribute of a history entry holding its image reference.
pub const IMAGE_REF_ATTR: &str = "data-img";

const HIGHLIGHT_BORDER: &str = "2px solid #2b7a2b";
const HIGHLIGHT_TRANSFORM: &str = "scale(1.05)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Visible,
}

impl PanelState {
    fn display(self) -> &'static str {
        match self {
            PanelState::Hidden => "none",
            PanelState::Visible => "block",
        }
    }
}

/// A gallery thumbnail: the styled container and its image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub container: ElementId,
    pub src: String,
}

/// Elements the controller works with, found once at startup.
#[derive(Debug, Clone)]
pub struct GalleryBindings {
    pub history_list: ElementId,
    pub panel: ElementId,
    pub history_items: Vec<ElementId>,
    pub view_all_links: Vec<ElementId>,
    pub thumbnails: Vec<Thumbnail>,
}

impl GalleryBindings {
    pub fn bind<D: Document + ?Sized>(doc: &D) -> Result<Self, BindError> {
        let history_list = doc
            .find_by_id(HISTORY_LIST_ID)
            .ok_or(BindError::MissingElement(HISTORY_LIST_ID))?;
        let panel = doc
            .find_by_id(GALLERY_WRAP_ID)
            .ok_or(BindError::MissingElement(GALLERY_WRAP_ID))?;
        doc.find_by_id(GALLERY_ID)
            .ok_or(BindError::MissingElement(GALLERY_ID))?;

        let mut thumbnails = Vec::new();
        for container in doc.find_by_class(None, THUMB_CLASS) {
            for image in doc.find_by_tag(container, "img") {
                // The highlight goes on the image's direct parent.
                let Some(parent) = doc.parent(image) else {
                    continue;
                };
                thumbnails.push(Thumbnail {
                    container: parent,
                    src: doc.attribute(image, "src").unwrap_or_default(),
                });
            }
        }

        Ok(Self {
            history_list,
            panel,
            history_items: doc.find_by_class(Some(history_list), HISTORY_ITEM_CLASS),
            view_all_links: doc.find_by_class(Some(history_list), VIEW_ALL_CLASS),
            thumbnails,
        })
    }
}

/// What a history-entry click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Panel opened; carries the highlighted thumbnail container, if any matched
    Opened(Option<ElementId>),
    Closed,
}

pub struct GalleryController {
    bindings: GalleryBindings,
    panel: PanelState,
    highlighted: Option<ElementId>,
}

impl GalleryController {
    /// Controller in the initial state: panel hidden, nothing highlighted.
    pub fn new(bindings: GalleryBindings) -> Self {
        Self {
            bindings,
            panel: PanelState::Hidden,
            highlighted: None,
        }
    }

    pub fn bindings(&self) -> &GalleryBindings {
        &self.bindings
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    /// Container of the highlighted thumbnail.
    pub fn highlighted(&self) -> Option<ElementId> {
        self.highlighted
    }

    pub fn is_history_item(&self, element: ElementId) -> bool {
        self.bindings.history_items.contains(&element)
    }

    pub fn is_view_all_link(&self, element: ElementId) -> bool {
        self.bindings.view_all_links.contains(&element)
    }

    /// Toggle the panel for a clicked history entry.
    ///
    /// Hidden → Visible highlights the first thumbnail whose source contains
    /// the entry's `data-img` and scrolls to the panel. Visible → Hidden
    /// changes nothing else.
    pub fn on_history_item_activated<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        item: ElementId,
    ) -> Transition {
        match self.panel {
            PanelState::Visible => {
                self.set_panel(doc, PanelState::Hidden);
                Transition::Closed
            }
            PanelState::Hidden => {
                self.set_panel(doc, PanelState::Visible);
                let image_ref = doc.attribute(item, IMAGE_REF_ATTR);
                let highlighted = self.highlight(doc, image_ref.as_deref());
                doc.scroll_into_view(self.bindings.panel, ScrollBehavior::Smooth);
                Transition::Opened(highlighted)
            }
        }
    }

    /// Open the panel unconditionally; the link's navigation is suppressed.
    pub fn on_view_all_activated<D: Document + ?Sized>(&mut self, doc: &mut D) -> DefaultAction {
        self.set_panel(doc, PanelState::Visible);
        DefaultAction::Prevent
    }

    fn set_panel<D: Document + ?Sized>(&mut self, doc: &mut D, state: PanelState) {
        self.panel = state;
        doc.set_style(self.bindings.panel, "display", state.display());
    }

    fn clear_highlight<D: Document + ?Sized>(&mut self, doc: &mut D) {
        for thumb in &self.bindings.thumbnails {
            doc.set_style(thumb.container, "border", "none");
            doc.set_style(thumb.container, "transform", "none");
        }
        self.highlighted = None;
    }

    fn highlight<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        image_ref: Option<&str>,
    ) -> Option<ElementId> {
        self.clear_highlight(doc);

        let image_ref = image_ref.filter(|r| !r.is_empty())?;
        let Some(thumb) = self
            .bindings
            .thumbnails
            .iter()
            .find(|thumb| thumb.src.contains(image_ref))
        else {
            debug!("No gallery thumbnail matches '{}'", image_ref);
            return None;
        };

        doc.set_style(thumb.container, "border", HIGHLIGHT_BORDER);
        doc.set_style(thumb.container, "transform", HIGHLIGHT_TRANSFORM);
        self.highlighted = Some(thumb.container);
        self.highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{El, MemoryDocument};

    struct Fixture {
        doc: MemoryDocument,
        gallery: GalleryController,
        items: Vec<ElementId>,
        thumbs: Vec<ElementId>,
        view_all: ElementId,
    }

    fn fixture(refs: &[&str], thumbs: &[&str]) -> Fixture {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let list = doc.append(body, El::new("div").id(HISTORY_LIST_ID));
        let items = refs
            .iter()
            .map(|r| {
                doc.append(
                    list,
                    El::new("div").class(HISTORY_ITEM_CLASS).attr(IMAGE_REF_ATTR, r),
                )
            })
            .collect();
        let view_all = doc.append(list, El::new("a").class(VIEW_ALL_CLASS));
        let wrap = doc.append(body, El::new("div").id(GALLERY_WRAP_ID));
        let grid = doc.append(wrap, El::new("div").id(GALLERY_ID));
        let thumbs = thumbs
            .iter()
            .map(|src| {
                let thumb = doc.append(grid, El::new("div").class(THUMB_CLASS));
                doc.append(thumb, El::new("img").attr("src", src));
                thumb
            })
            .collect();

        let gallery = GalleryController::new(GalleryBindings::bind(&doc).unwrap());
        Fixture {
            doc,
            gallery,
            items,
            thumbs,
            view_all,
        }
    }

    fn highlighted(f: &Fixture) -> Vec<ElementId> {
        f.thumbs
            .iter()
            .copied()
            .filter(|t| f.doc.style(*t, "border").as_deref() == Some(HIGHLIGHT_BORDER))
            .collect()
    }

    fn panel_display(f: &Fixture) -> Option<String> {
        f.doc.style(f.gallery.bindings().panel, "display")
    }

    #[test]
    fn test_initial_state_is_hidden() {
        let f = fixture(&["a.jpg"], &["a.jpg"]);
        assert_eq!(f.gallery.panel(), PanelState::Hidden);
        assert_eq!(f.gallery.highlighted(), None);
    }

    #[test]
    fn test_open_highlights_matching_thumbnail() {
        let mut f = fixture(&["a.jpg", "b.jpg", "c.jpg"], &["a.jpg", "b.jpg", "c.jpg"]);

        let transition = f.gallery.on_history_item_activated(&mut f.doc, f.items[1]);

        assert_eq!(transition, Transition::Opened(Some(f.thumbs[1])));
        assert_eq!(panel_display(&f).as_deref(), Some("block"));
        assert_eq!(highlighted(&f), vec![f.thumbs[1]]);
        assert_eq!(
            f.doc.style(f.thumbs[1], "transform").as_deref(),
            Some(HIGHLIGHT_TRANSFORM)
        );
        assert_eq!(f.doc.scroll_log().len(), 1);
        assert_eq!(f.doc.scroll_log()[0].1, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_substring_match_against_thumbnail_source() {
        let mut f = fixture(&["uploads/b.jpg"], &["/uploads/a.jpg", "http://host/uploads/b.jpg"]);

        f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);

        assert_eq!(highlighted(&f), vec![f.thumbs[1]]);
    }

    #[test]
    fn test_close_leaves_highlight_untouched() {
        let mut f = fixture(&["a.jpg", "b.jpg"], &["a.jpg", "b.jpg"]);
        f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);

        let transition = f.gallery.on_history_item_activated(&mut f.doc, f.items[1]);

        assert_eq!(transition, Transition::Closed);
        assert_eq!(panel_display(&f).as_deref(), Some("none"));
        assert_eq!(highlighted(&f), vec![f.thumbs[0]]);
        assert_eq!(f.gallery.highlighted(), Some(f.thumbs[0]));
        assert_eq!(f.doc.scroll_log().len(), 1);
    }

    #[test]
    fn test_reopen_moves_highlight() {
        let mut f = fixture(&["a.jpg", "b.jpg"], &["a.jpg", "b.jpg"]);
        f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);
        f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);

        f.gallery.on_history_item_activated(&mut f.doc, f.items[1]);

        assert_eq!(highlighted(&f), vec![f.thumbs[1]]);
        assert_eq!(f.doc.style(f.thumbs[0], "border").as_deref(), Some("none"));
    }

    #[test]
    fn test_no_match_still_opens() {
        let mut f = fixture(&["z.jpg"], &["a.jpg", "b.jpg"]);

        let transition = f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);

        assert_eq!(transition, Transition::Opened(None));
        assert_eq!(f.gallery.panel(), PanelState::Visible);
        assert!(highlighted(&f).is_empty());
    }

    #[test]
    fn test_empty_reference_highlights_nothing() {
        let mut f = fixture(&[""], &["a.jpg"]);

        f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);

        assert!(highlighted(&f).is_empty());
    }

    #[test]
    fn test_duplicate_sources_highlight_first_only() {
        let mut f = fixture(&["a.jpg"], &["a.jpg", "a.jpg"]);

        f.gallery.on_history_item_activated(&mut f.doc, f.items[0]);

        assert_eq!(highlighted(&f), vec![f.thumbs[0]]);
    }

    #[test]
    fn test_view_all_always_opens() {
        let mut f = fixture(&["a.jpg"], &["a.jpg"]);

        assert_eq!(f.gallery.on_view_all_activated(&mut f.doc), DefaultAction::Prevent);
        assert_eq!(f.gallery.panel(), PanelState::Visible);
        f.gallery.on_view_all_activated(&mut f.doc);
        assert_eq!(f.gallery.panel(), PanelState::Visible);
        assert!(highlighted(&f).is_empty());
        assert!(f.gallery.is_view_all_link(f.view_all));
    }

    #[test]
    fn test_bind_fails_without_panel() {
        let mut doc = MemoryDocument::new();
        doc.append(doc.body(), El::new("div").id(HISTORY_LIST_ID));

        assert_eq!(
            GalleryBindings::bind(&doc).unwrap_err(),
            BindError::MissingElement(GALLERY_WRAP_ID)
        );
    }
}
