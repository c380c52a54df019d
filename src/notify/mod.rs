//! Best-effort locale notification to the server.
//!
//! After a locale switch the page tells the server (`GET /set_language/<locale>`)
//! so later full page loads render in the same language. The call runs as a
//! detached task: its outcome is logged and counted, never returned.
//!
//! # Architecture
//!
//! - `http`: [`HttpNotifier`] over reqwest on a tokio runtime (native targets)
//! - `fetch`: [`FetchNotifier`] over the browser's `fetch` (the `web` feature)

#[cfg(feature = "web")]
mod fetch;
#[cfg(not(target_arch = "wasm32"))]
mod http;

#[cfg(feature = "web")]
pub use fetch::FetchNotifier;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpNotifier;

use crate::error::NotifyError;
use reqwest::Url;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// First path segment of the locale persistence endpoint.
pub const SET_LANGUAGE_PATH: &str = "set_language";

type Settle = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Handle to an in-flight notification.
///
/// Dropping it detaches the task. Awaiting [`NotifyHandle::settled`] only
/// waits for completion; there is no result to inspect.
pub struct NotifyHandle {
    settle: Option<Settle>,
}

impl NotifyHandle {
    /// A handle with nothing to wait for: the notification was dropped up
    /// front, or the host runs it where it cannot be awaited.
    pub fn detached() -> Self {
        Self { settle: None }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawned(task: tokio::task::JoinHandle<()>) -> Self {
        Self {
            settle: Some(Box::pin(async move {
                let _ = task.await;
            })),
        }
    }

    pub fn is_spawned(&self) -> bool {
        self.settle.is_some()
    }

    /// Wait until the notification finished, whatever its outcome.
    pub async fn settled(self) {
        if let Some(settle) = self.settle {
            settle.await;
        }
    }
}

impl fmt::Debug for NotifyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyHandle")
            .field("spawned", &self.is_spawned())
            .finish()
    }
}

/// Tells the server which locale the user picked.
pub trait LocaleNotifier: Send + Sync {
    /// Issue the notification without blocking the caller.
    fn notify(&self, locale: &str) -> NotifyHandle;
}

/// Build `<base>/set_language/<locale>` with `locale` percent-encoded as one path segment.
pub fn set_language_url(base: &Url, locale: &str) -> Result<Url, NotifyError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| NotifyError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push(SET_LANGUAGE_PATH)
        .push(locale);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
