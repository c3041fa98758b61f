//! Error types for page fetching.
//!
//! Page fetch failures never abort a run: [`super::PageFetcher`] wraps them
//! in [`super::FetchOutcome::Failed`] so callers branch on the outcome.

use thiserror::Error;

/// Transport-level failures while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The redirect chain exceeded the client limit.
    #[error("too many redirects fetching {url}")]
    TooManyRedirects {
        /// The URL that started the chain.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Classifies a reqwest error raised while sending or reading a request.
    pub fn from_request(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_redirect() {
            Self::TooManyRedirects { url }
        } else {
            Self::Network { url, source }
        }
    }
}
