//! [`LocaleNotifier`] for the browser: `fetch` with same-origin credentials.
//!
//! The session cookie rides along with the request, so the server can store
//! the choice on the session. The request is queued on the page's event loop
//! with `spawn_local` and cannot be awaited from the caller.

use super::{set_language_url, LocaleNotifier, NotifyHandle};
use crate::error::NotifyError;
use crate::i18n::LocalizationMetrics;
use reqwest::Url;
use std::sync::Arc;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

pub struct FetchNotifier {
    base_url: Url,
    metrics: Arc<LocalizationMetrics>,
}

impl FetchNotifier {
    /// # Arguments
    /// * `base_url` - Origin the page was served from (`location.origin`)
    /// * `metrics` - Page counters; every attempt and failure is recorded
    pub fn new(base_url: Url, metrics: Arc<LocalizationMetrics>) -> Self {
        Self { base_url, metrics }
    }
}

impl LocaleNotifier for FetchNotifier {
    fn notify(&self, locale: &str) -> NotifyHandle {
        self.metrics.record_notification_sent();

        let url = match set_language_url(&self.base_url, locale) {
            Ok(url) => url,
            Err(e) => {
                self.metrics.record_notification_failure();
                debug!("Locale notification dropped: {}", e);
                return NotifyHandle::detached();
            }
        };

        let metrics = Arc::clone(&self.metrics);
        spawn_local(async move {
            match fetch(&url).await {
                Ok(status) => debug!("Locale notification to {} answered {}", url, status),
                Err(e) => {
                    metrics.record_notification_failure();
                    debug!("Locale notification dropped: {}", e);
                }
            }
        });

        NotifyHandle::detached()
    }
}

/// One GET. Any HTTP status counts as delivered.
async fn fetch(url: &Url) -> Result<u16, NotifyError> {
    let window = web_sys::window().ok_or_else(|| NotifyError::Browser("no window".into()))?;

    let headers = Headers::new().map_err(browser_error)?;
    headers
        .set("X-Requested-With", "XMLHttpRequest")
        .map_err(browser_error)?;
    headers.set("Accept", "application/json").map_err(browser_error)?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_headers(&headers);

    let request = Request::new_with_str_and_init(url.as_str(), &init).map_err(browser_error)?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(browser_error)?;
    let response: Response = response.dyn_into().map_err(browser_error)?;

    Ok(response.status())
}

fn browser_error(value: JsValue) -> NotifyError {
    NotifyError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
