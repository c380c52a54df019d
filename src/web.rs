//! Browser entry point.
//!
//! Once the DOM is ready the page is mounted over the live document in the
//! locale the server rendered with (`window.__SERVER_LANG__`), and one
//! listener per [`Hook`] forwards browser events to [`Page::dispatch`].

use crate::dom::{DefaultAction, WebDocument};
use crate::i18n::{LocaleTable, LocalizationMetrics};
use crate::notify::FetchNotifier;
use crate::page::{Hook, HookKind, Page, PageEvent};
use crate::upload::SelectedFile;
use reqwest::Url;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};

/// Global the server template sets to the locale it rendered the page in.
const SERVER_LANG_GLOBAL: &str = "__SERVER_LANG__";

struct Session {
    doc: WebDocument,
    page: Page,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return mount();
    }

    let on_ready = Closure::wrap(Box::new(move |_: Event| {
        if let Err(e) = mount() {
            debug!("Page not mounted: {:?}", e);
        }
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut doc = WebDocument::current().ok_or_else(|| JsValue::from_str("no document"))?;

    let hint = js_sys::Reflect::get(&window, &JsValue::from_str(SERVER_LANG_GLOBAL))
        .ok()
        .and_then(|value| value.as_string());
    let origin = window.location().origin()?;
    let base_url = Url::parse(&origin).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let metrics = Arc::new(LocalizationMetrics::new());
    let notifier = Arc::new(FetchNotifier::new(base_url, metrics.clone()));
    let (page, report) = Page::mount(
        &mut doc,
        Arc::new(LocaleTable::builtin()),
        notifier,
        metrics,
        hint.as_deref(),
    );

    let hooks = page.hooks();
    info!("Rendered in '{}', attaching {} listeners", report.applied, hooks.len());

    let session = Rc::new(RefCell::new(Session { doc, page }));
    for hook in hooks {
        attach(&session, hook)?;
    }
    Ok(())
}

fn attach(session: &Rc<RefCell<Session>>, hook: Hook) -> Result<(), JsValue> {
    let Some(target) = session.borrow().doc.element(hook.element) else {
        return Ok(());
    };

    let session = Rc::clone(session);
    let listener = Closure::wrap(Box::new(move |event: Event| {
        // A handler that triggers another event synchronously must not re-enter.
        let Ok(mut session) = session.try_borrow_mut() else {
            return;
        };
        let Session { doc, page } = &mut *session;

        let Some(page_event) = page_event(doc, hook, &event) else {
            return;
        };
        if page.dispatch(doc, page_event) == DefaultAction::Prevent {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback_and_bool(
        hook.kind.event_type(),
        listener.as_ref().unchecked_ref(),
        hook.kind.capture(),
    )?;
    listener.forget();
    Ok(())
}

fn page_event(doc: &WebDocument, hook: Hook, event: &Event) -> Option<PageEvent> {
    match hook.kind {
        HookKind::FileInput => Some(PageEvent::FileSelected(selected_file(event))),
        HookKind::PreviewLoad => {
            let target = event.target()?.dyn_into::<Element>().ok()?;
            hook.event(doc.handle(&target))
        }
        _ => hook.event(hook.element),
    }
}

/// The first file of the input that fired `change`, if any.
fn selected_file(event: &Event) -> Option<SelectedFile> {
    let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    let file = input.files()?.get(0)?;
    Some(SelectedFile::new(file.name(), file.type_()))
}
