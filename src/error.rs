//! Error types for the fallible plumbing around the page controllers.
//!
//! None of these ever reach a user: event handlers log them and carry on.

use thiserror::Error;

/// Problems building a [`crate::i18n::LocaleTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("base locale '{0}' has no translation map")]
    MissingBaseLocale(String),

    #[error("locale identifier must not be empty")]
    EmptyLocale,
}

/// Markup the gallery controller needs but the page does not provide.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("required element #{0} not found")]
    MissingElement(&'static str),
}

/// Failure delivering a locale notification to the server.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid notification URL: {0}")]
    InvalidUrl(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("no async runtime available to send the notification")]
    NoRuntime,

    #[error("browser rejected the request: {0}")]
    Browser(String),
}
