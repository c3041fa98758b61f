//! Error types for the download module.
//!
//! A download error concerns exactly one file; the orchestrator logs it and
//! moves on to the next URL.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a single PDF.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while writing the downloaded bytes.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The URL has no usable final path segment to name the file after.
    #[error("cannot derive a file name from URL: {url}")]
    NoFileName {
        /// The URL without a basename.
        url: String,
    },
}

impl DownloadError {
    /// Creates an error from a reqwest failure, separating timeouts.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing file name error.
    pub fn no_file_name(url: impl Into<String>) -> Self {
        Self::NoFileName { url: url.into() }
    }

    /// The URL of the request that failed, when the failure was a request.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::HttpStatus { url, .. }
            | Self::NoFileName { url } => Some(url),
            Self::Io { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_http_status_display() {
        let error = DownloadError::http_status("https://ocw.mit.edu/notes1.pdf", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(
            msg.contains("https://ocw.mit.edu/notes1.pdf"),
            "Expected URL in: {msg}"
        );
        assert_eq!(error.url(), Some("https://ocw.mit.edu/notes1.pdf"));
    }

    #[test]
    fn test_download_error_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/notes1.pdf"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/notes1.pdf"), "Expected path in: {msg}");
        assert!(error.url().is_none());
    }

    #[test]
    fn test_download_error_no_file_name_display() {
        let error = DownloadError::no_file_name("https://ocw.mit.edu/courses/x/");
        assert!(error.to_string().contains("https://ocw.mit.edu/courses/x/"));
    }
}
