//! The user dashboard as the server renders it.
//!
//! Used by the preview binary and by tests that need a realistic page: a
//! language selector, translatable headings, the upload form, the recent
//! uploads list and the hidden "all images" gallery.

use super::{Document, El, ElementId, MemoryDocument};
use crate::i18n::LocaleRegistry;

/// Selector links in page order, and whether each carries `data-lang`.
/// Older templates render the Marathi link with only its href.
const SELECTOR_LINKS: &[(&str, bool)] = &[("en", true), ("hi", true), ("mr", false)];

/// Handles to the interactive parts of a built dashboard.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub locale_controls: Vec<ElementId>,
    pub history_items: Vec<ElementId>,
    pub view_all_link: Option<ElementId>,
    pub thumbnails: Vec<ElementId>,
    pub gallery_wrap: Option<ElementId>,
}

/// Render the dashboard into `doc`, one history entry and thumbnail per upload.
///
/// `uploads` are file names; history entries reference them as
/// `uploads/<name>` and thumbnails load them from `/uploads/<name>`.
pub fn build(doc: &mut MemoryDocument, uploads: &[&str]) -> Dashboard {
    let body = doc.body();
    let mut dashboard = Dashboard::default();

    let nav = doc.append(body, El::new("nav").class("lang-select"));
    let registry = LocaleRegistry::get();
    for (code, tagged) in SELECTOR_LINKS {
        let Some(locale) = registry.get_by_code(code) else {
            continue;
        };
        let mut link = El::new("a")
            .attr("href", &format!("/set_language/{}", locale.code))
            .attr("title", locale.name)
            .text(locale.native_name);
        if *tagged {
            link = link.attr("data-lang", locale.code);
        }
        dashboard.locale_controls.push(doc.append(nav, link));
    }
    doc.append(
        body,
        El::new("a")
            .attr("href", "/logout")
            .attr("data-i18n", "logout")
            .text("Logout"),
    );

    let uploads_card = doc.append(body, El::new("section").class("card"));
    doc.append(
        uploads_card,
        El::new("h3")
            .attr("data-i18n", "recent_uploads_title")
            .text("Recent uploads"),
    );
    doc.append(
        uploads_card,
        El::new("p")
            .attr("data-i18n", "recent_uploads_desc")
            .text("Click to view all uploaded images in a gallery."),
    );

    let history = doc.append(uploads_card, El::new("div").id("historyList"));
    if uploads.is_empty() {
        doc.append(
            history,
            El::new("p")
                .attr("data-i18n", "no_recent")
                .text("No recent uploads yet."),
        );
    }
    for name in uploads {
        let item = doc.append(
            history,
            El::new("div")
                .class("history-item")
                .attr("data-img", &format!("uploads/{}", name)),
        );
        doc.append(item, El::new("img").attr("src", &format!("/uploads/{}", name)));
        dashboard.history_items.push(item);
    }
    dashboard.view_all_link = Some(doc.append(
        history,
        El::new("a")
            .class("view-all-link")
            .attr("href", "#allGalleryWrap")
            .attr("data-i18n", "view_all")
            .text("View all →"),
    ));

    let upload_card = doc.append(body, El::new("section").class("card"));
    doc.append(
        upload_card,
        El::new("h3")
            .attr("data-i18n", "upload_title")
            .text("Upload leaf image"),
    );
    let form = doc.append(
        upload_card,
        El::new("form")
            .id("uploadForm")
            .attr("action", "/predict_file")
            .attr("method", "post"),
    );
    doc.append(
        form,
        El::new("input")
            .id("fileInput")
            .attr("type", "file")
            .attr("accept", "image/*"),
    );
    doc.append(
        form,
        El::new("button")
            .id("uploadBtn")
            .attr("type", "submit")
            .attr("data-i18n", "upload_btn")
            .text("Upload & Predict"),
    );
    let preview = doc.append(upload_card, El::new("div").id("preview"));
    doc.append(
        preview,
        El::new("span")
            .attr("data-i18n", "image_preview")
            .text("Image preview"),
    );

    let wrap = doc.append(
        body,
        El::new("div").id("allGalleryWrap").style("display", "none"),
    );
    let gallery = doc.append(wrap, El::new("div").id("allGallery"));
    for name in uploads {
        let thumb = doc.append(gallery, El::new("div").class("gallery-thumb"));
        doc.append(thumb, El::new("img").attr("src", &format!("/uploads/{}", name)));
        dashboard.thumbnails.push(thumb);
    }
    dashboard.gallery_wrap = Some(wrap);

    dashboard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_creates_one_entry_per_upload() {
        let mut doc = MemoryDocument::new();
        let dashboard = build(&mut doc, &["a.jpg", "b.jpg"]);

        assert_eq!(dashboard.history_items.len(), 2);
        assert_eq!(dashboard.thumbnails.len(), 2);
        assert_eq!(dashboard.locale_controls.len(), 3);
        assert_eq!(
            doc.attribute(dashboard.history_items[1], "data-img").as_deref(),
            Some("uploads/b.jpg")
        );
    }

    #[test]
    fn test_build_without_uploads_shows_empty_notice() {
        let mut doc = MemoryDocument::new();
        let dashboard = build(&mut doc, &[]);

        assert!(dashboard.history_items.is_empty());
        let keys: Vec<_> = doc
            .find_by_attribute("data-i18n")
            .into_iter()
            .filter_map(|el| doc.attribute(el, "data-i18n"))
            .collect();
        assert!(keys.contains(&"no_recent".to_string()));
    }

    #[test]
    fn test_selector_links_use_registry_names() {
        let mut doc = MemoryDocument::new();
        let dashboard = build(&mut doc, &[]);

        let labels: Vec<_> = dashboard
            .locale_controls
            .iter()
            .map(|el| (doc.text_content(*el).unwrap(), doc.attribute(*el, "title").unwrap()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("English".to_string(), "English".to_string()),
                ("हिन्दी".to_string(), "Hindi".to_string()),
                ("मराठी".to_string(), "Marathi".to_string()),
            ]
        );
        assert_eq!(doc.attribute(dashboard.locale_controls[1], "data-lang").as_deref(), Some("hi"));
        assert_eq!(doc.attribute(dashboard.locale_controls[2], "data-lang"), None);
        assert_eq!(
            doc.attribute(dashboard.locale_controls[2], "href").as_deref(),
            Some("/set_language/mr")
        );
    }

    #[test]
    fn test_gallery_starts_hidden() {
        let mut doc = MemoryDocument::new();
        let dashboard = build(&mut doc, &["a.jpg"]);
        let wrap = dashboard.gallery_wrap.unwrap();

        assert_eq!(doc.style(wrap, "display").as_deref(), Some("none"));
    }
}
