//! One page view: the localization engine, the gallery and the upload preview
//! wired to the same document.

use crate::dom::{DefaultAction, Document, ElementId, ObjectUrls};
use crate::gallery::{GalleryBindings, GalleryController};
use crate::i18n::{LocaleTable, LocalizationMetrics};
use crate::localizer::{ApplyReport, LocalizationEngine};
use crate::notify::LocaleNotifier;
use crate::upload::{SelectedFile, UploadPreview};
use std::sync::Arc;
use tracing::{debug, info};

/// A user interaction the host forwards to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    LocaleControlClicked(ElementId),
    HistoryItemClicked(ElementId),
    ViewAllClicked(ElementId),
    /// The file input changed; `None` when the selection was cleared
    FileSelected(Option<SelectedFile>),
    /// A preview image finished loading
    PreviewLoaded(ElementId),
    FormSubmitted,
}

/// Which browser event a bound element is listened to for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    LocaleControl,
    HistoryItem,
    ViewAll,
    FileInput,
    /// Preview container; sees its images' `load` while capturing
    PreviewLoad,
    FormSubmit,
}

impl HookKind {
    /// DOM event type to listen for.
    pub fn event_type(self) -> &'static str {
        match self {
            HookKind::LocaleControl | HookKind::HistoryItem | HookKind::ViewAll => "click",
            HookKind::FileInput => "change",
            HookKind::PreviewLoad => "load",
            HookKind::FormSubmit => "submit",
        }
    }

    /// Whether the listener must run in the capture phase. `load` does not bubble.
    pub fn capture(self) -> bool {
        matches!(self, HookKind::PreviewLoad)
    }
}

/// A listener a browser host attaches for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    pub element: ElementId,
    pub kind: HookKind,
}

impl Hook {
    /// The [`PageEvent`] a fired listener becomes.
    ///
    /// `target` is the element the DOM event was aimed at; only preview loads
    /// use it. File input changes return `None`, since the host has to read
    /// the selection itself.
    pub fn event(&self, target: ElementId) -> Option<PageEvent> {
        match self.kind {
            HookKind::LocaleControl => Some(PageEvent::LocaleControlClicked(self.element)),
            HookKind::HistoryItem => Some(PageEvent::HistoryItemClicked(self.element)),
            HookKind::ViewAll => Some(PageEvent::ViewAllClicked(self.element)),
            HookKind::FileInput => None,
            HookKind::PreviewLoad => Some(PageEvent::PreviewLoaded(target)),
            HookKind::FormSubmit => Some(PageEvent::FormSubmitted),
        }
    }
}

pub struct Page {
    localizer: LocalizationEngine,
    gallery: Option<GalleryController>,
    upload: UploadPreview,
}

impl Page {
    /// Bind every component and render the page in the server's locale.
    ///
    /// `server_hint` is the locale the server rendered with; `None` (or an
    /// unknown code) means the base locale. No notification is sent.
    pub fn mount<D: Document + ?Sized>(
        doc: &mut D,
        table: Arc<LocaleTable>,
        notifier: Arc<dyn LocaleNotifier>,
        metrics: Arc<LocalizationMetrics>,
        server_hint: Option<&str>,
    ) -> (Self, ApplyReport) {
        let mut localizer = LocalizationEngine::bind(&*doc, table, notifier, metrics);
        let report = localizer.initialize(doc, server_hint);

        let gallery = match GalleryBindings::bind(&*doc) {
            Ok(bindings) => Some(GalleryController::new(bindings)),
            Err(e) => {
                debug!("Gallery disabled: {}", e);
                None
            }
        };
        let upload = UploadPreview::bind(&*doc);

        info!(
            "Mounted page in '{}' ({} targets, gallery {})",
            report.applied,
            localizer.targets().len(),
            if gallery.is_some() { "on" } else { "off" }
        );

        (
            Self {
                localizer,
                gallery,
                upload,
            },
            report,
        )
    }

    pub fn localizer(&self) -> &LocalizationEngine {
        &self.localizer
    }

    pub fn localizer_mut(&mut self) -> &mut LocalizationEngine {
        &mut self.localizer
    }

    pub fn gallery(&self) -> Option<&GalleryController> {
        self.gallery.as_ref()
    }

    pub fn upload(&self) -> &UploadPreview {
        &self.upload
    }

    /// Every listener the page needs, grouped by component.
    ///
    /// Elements a component did not bind get no hook.
    pub fn hooks(&self) -> Vec<Hook> {
        let mut hooks: Vec<Hook> = self
            .localizer
            .controls()
            .iter()
            .map(|control| Hook {
                element: control.element,
                kind: HookKind::LocaleControl,
            })
            .collect();

        if let Some(gallery) = &self.gallery {
            let bindings = gallery.bindings();
            hooks.extend(bindings.history_items.iter().map(|element| Hook {
                element: *element,
                kind: HookKind::HistoryItem,
            }));
            hooks.extend(bindings.view_all_links.iter().map(|element| Hook {
                element: *element,
                kind: HookKind::ViewAll,
            }));
        }

        let upload = [
            (self.upload.input(), HookKind::FileInput),
            (self.upload.preview(), HookKind::PreviewLoad),
            (self.upload.form(), HookKind::FormSubmit),
        ];
        hooks.extend(
            upload
                .into_iter()
                .filter_map(|(element, kind)| element.map(|element| Hook { element, kind })),
        );

        hooks
    }

    /// Route one event to the component that owns it.
    ///
    /// Events aimed at elements no component bound are ignored and the
    /// default action is allowed.
    pub fn dispatch<D: Document + ObjectUrls + ?Sized>(
        &mut self,
        doc: &mut D,
        event: PageEvent,
    ) -> DefaultAction {
        match event {
            PageEvent::LocaleControlClicked(element) => {
                self.localizer.on_locale_control_activated(doc, element)
            }
            PageEvent::HistoryItemClicked(element) => {
                if let Some(gallery) = self.gallery.as_mut() {
                    if gallery.is_history_item(element) {
                        gallery.on_history_item_activated(doc, element);
                    }
                }
                DefaultAction::Allow
            }
            PageEvent::ViewAllClicked(element) => match self.gallery.as_mut() {
                Some(gallery) if gallery.is_view_all_link(element) => {
                    gallery.on_view_all_activated(doc)
                }
                _ => DefaultAction::Allow,
            },
            PageEvent::FileSelected(file) => {
                self.upload.on_file_selected(doc, file.as_ref());
                DefaultAction::Allow
            }
            PageEvent::PreviewLoaded(image) => {
                self.upload.on_preview_loaded(doc, image);
                DefaultAction::Allow
            }
            PageEvent::FormSubmitted => {
                self.upload.on_form_submitted(doc);
                DefaultAction::Allow
            }
        }
    }
}
