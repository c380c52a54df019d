//! Upload preview: a local preview of the picked file and a busy submit button.

use crate::dom::{Document, ElementId, ObjectUrls};
use tracing::{debug, info};

pub const FILE_INPUT_ID: &str = "fileInput";
pub const PREVIEW_ID: &str = "preview";
pub const UPLOAD_BUTTON_ID: &str = "uploadBtn";
pub const UPLOAD_FORM_ID: &str = "uploadForm";

/// MIME types the upload endpoint accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg", "image/bmp"];

pub const EMPTY_PLACEHOLDER: &str = "Image preview will appear here";
pub const INVALID_TYPE_PLACEHOLDER: &str = "Invalid file type";
pub const UPLOADING_LABEL: &str = "Uploading…";

/// The file a user picked, as far as the preview cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        ACCEPTED_MIME_TYPES.contains(&self.mime_type.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Nothing selected; placeholder shown
    Empty,
    /// Unsupported type; input cleared, message shown
    Rejected,
    Previewing { image: ElementId, object_url: String },
}

/// Preview state for the upload form.
///
/// Each element is optional: a page without the input gets no preview, a
/// page without the form never disables the button.
#[derive(Debug, Default)]
pub struct UploadPreview {
    input: Option<ElementId>,
    preview: Option<ElementId>,
    button: Option<ElementId>,
    form: Option<ElementId>,
    /// Preview images whose object URL has not been revoked yet
    pending: Vec<(ElementId, String)>,
}

impl UploadPreview {
    pub fn bind<D: Document + ?Sized>(doc: &D) -> Self {
        Self {
            input: doc.find_by_id(FILE_INPUT_ID),
            preview: doc.find_by_id(PREVIEW_ID),
            button: doc.find_by_id(UPLOAD_BUTTON_ID),
            form: doc.find_by_id(UPLOAD_FORM_ID),
            pending: Vec::new(),
        }
    }

    pub fn input(&self) -> Option<ElementId> {
        self.input
    }

    pub fn preview(&self) -> Option<ElementId> {
        self.preview
    }

    pub fn form(&self) -> Option<ElementId> {
        self.form
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    pub fn has_form(&self) -> bool {
        self.form.is_some()
    }

    /// Object URLs still waiting for their preview to load.
    pub fn pending_urls(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(|(_, url)| url.as_str())
    }

    /// Handle a change of the file input. `None` means the selection was cleared.
    pub fn on_file_selected<D: Document + ObjectUrls + ?Sized>(
        &mut self,
        doc: &mut D,
        file: Option<&SelectedFile>,
    ) -> Option<PreviewOutcome> {
        let input = self.input?;
        let preview = self.preview?;

        let Some(file) = file else {
            doc.set_inner_html(preview, &placeholder(EMPTY_PLACEHOLDER));
            return Some(PreviewOutcome::Empty);
        };

        if !file.is_accepted() {
            info!("Rejected upload '{}' of type '{}'", file.name, file.mime_type);
            doc.clear_input(input);
            doc.set_inner_html(preview, &placeholder(INVALID_TYPE_PLACEHOLDER));
            return Some(PreviewOutcome::Rejected);
        }

        let object_url = doc.create_object_url(&file.name);
        let image = doc.create_element("img");
        doc.set_attribute(image, "src", &object_url);
        doc.set_inner_html(preview, "");
        doc.append_child(preview, image);
        self.pending.push((image, object_url.clone()));

        debug!("Previewing '{}' from {}", file.name, object_url);
        Some(PreviewOutcome::Previewing { image, object_url })
    }

    /// The preview image finished loading; release its object URL.
    pub fn on_preview_loaded<D: ObjectUrls + ?Sized>(&mut self, doc: &mut D, image: ElementId) {
        let Some(index) = self.pending.iter().position(|(el, _)| *el == image) else {
            return;
        };
        let (_, url) = self.pending.remove(index);
        doc.revoke_object_url(&url);
    }

    /// The form is being submitted. The button stays disabled afterwards.
    pub fn on_form_submitted<D: Document + ?Sized>(&self, doc: &mut D) {
        if self.form.is_none() {
            return;
        }
        let Some(button) = self.button else {
            return;
        };
        doc.set_attribute(button, "disabled", "");
        doc.set_text_content(button, UPLOADING_LABEL);
    }
}

fn placeholder(message: &str) -> String {
    format!(r#"<span style="color:#777">{}</span>"#, message)
}
