//! [`LocaleNotifier`] for native hosts: reqwest on the ambient tokio runtime.

use super::{set_language_url, LocaleNotifier, NotifyHandle};
use crate::config::Config;
use crate::error::NotifyError;
use crate::i18n::LocalizationMetrics;
use crate::retry::{with_retry, RetryConfig};
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use tracing::debug;

/// [`LocaleNotifier`] that calls the server over HTTP.
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: Url,
    session_cookie: Option<String>,
    retry: RetryConfig,
    metrics: Arc<LocalizationMetrics>,
}

impl HttpNotifier {
    pub fn new(config: &Config, metrics: Arc<LocalizationMetrics>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.notify_timeout)
            .build()
            .map_err(NotifyError::Client)?;

        Ok(Self {
            client,
            base_url: config.server_base_url.clone(),
            session_cookie: config.session_cookie.clone(),
            retry: RetryConfig::notification(config.notify_max_attempts),
            metrics,
        })
    }
}

impl LocaleNotifier for HttpNotifier {
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

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            self.metrics.record_notification_failure();
            debug!("Locale notification dropped: {}", NotifyError::NoRuntime);
            return NotifyHandle::detached();
        };

        let client = self.client.clone();
        let cookie = self.session_cookie.clone();
        let retry = self.retry.clone();
        let metrics = Arc::clone(&self.metrics);

        let task = runtime.spawn(async move {
            let outcome = with_retry(&retry, "locale notification", || {
                send(&client, &url, cookie.as_deref())
            })
            .await;

            match outcome {
                Ok(status) => debug!("Locale notification to {} answered {}", url, status),
                Err(e) => {
                    metrics.record_notification_failure();
                    debug!("Locale notification dropped: {}", e);
                }
            }
        });

        NotifyHandle::spawned(task)
    }
}

/// One request. Any HTTP status counts as delivered.
async fn send(
    client: &reqwest::Client,
    url: &Url,
    cookie: Option<&str>,
) -> Result<StatusCode, NotifyError> {
    let mut request = client
        .get(url.clone())
        .header("X-Requested-With", "XMLHttpRequest")
        .header(ACCEPT, "application/json");
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }

    let response = request
        .send()
        .await
        .map_err(|source| NotifyError::Transport {
            url: url.to_string(),
            source,
        })?;

    Ok(response.status())
}
