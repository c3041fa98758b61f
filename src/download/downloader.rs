//! Single-file PDF downloader with HTTP to HTTPS fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::error::DownloadError;
use super::filename::{https_fallback_url, url_basename};

/// What happened to one PDF URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was fetched and written.
    Saved {
        /// Destination path.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
        /// URL the bytes actually came from (differs after HTTPS fallback).
        fetched_from: String,
    },
    /// A file already existed at the destination; nothing was requested.
    Skipped {
        /// Existing destination path.
        path: PathBuf,
    },
}

/// Downloads PDFs into a destination directory, one request at a time.
///
/// Existing files are never re-fetched or overwritten, so repeated runs only
/// fetch what is missing.
#[derive(Debug, Clone)]
pub struct FileDownloader {
    client: Client,
    timeout: Duration,
}

impl FileDownloader {
    /// Creates a downloader sharing `client`, with `timeout` per request.
    #[must_use]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Destination path for `pdf_url` inside `dest_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::NoFileName`] when the URL has no basename.
    pub fn destination(pdf_url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError> {
        url_basename(pdf_url)
            .map(|name| dest_dir.join(name))
            .ok_or_else(|| DownloadError::no_file_name(pdf_url))
    }

    /// Downloads `pdf_url` into `dest_dir/<basename>`.
    ///
    /// On failure of an `http://` URL, the `https://` equivalent is tried
    /// exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] when the file cannot be fetched (after the
    /// fallback, if one applies) or cannot be written. The error of the last
    /// attempted request is returned.
    #[instrument(skip(self, dest_dir), fields(url = %pdf_url))]
    pub async fn download(
        &self,
        pdf_url: &str,
        dest_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let path = Self::destination(pdf_url, dest_dir)?;
        if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?
        {
            info!(path = %path.display(), "already exists, skipping");
            return Ok(DownloadOutcome::Skipped { path });
        }

        let (bytes, fetched_from) = match self.fetch_bytes(pdf_url).await {
            Ok(bytes) => (bytes, pdf_url.to_string()),
            Err(error) => {
                let Some(secure_url) = https_fallback_url(pdf_url) else {
                    return Err(error);
                };
                warn!(error = %error, fallback = %secure_url, "download failed, retrying over HTTPS");
                let bytes = self.fetch_bytes(&secure_url).await?;
                (bytes, secure_url)
            }
        };

        let body = bytes.as_ref();
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;

        info!(path = %path.display(), bytes = body.len(), "saved");
        Ok(DownloadOutcome::Saved {
            path,
            bytes: body.len() as u64,
            fetched_from,
        })
    }

    /// GETs `url` and buffers the whole body.
    async fn fetch_bytes(&self, url: &str) -> Result<impl AsRef<[u8]> + use<>, DownloadError> {
        debug!(url, "fetching file");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DownloadError::request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| DownloadError::request(url, e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_joins_basename() {
        let path = FileDownloader::destination(
            "https://ocw.mit.edu/courses/x/notes1.pdf",
            Path::new("downloads/x/lecture_notes"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("downloads/x/lecture_notes/notes1.pdf"));
    }

    #[test]
    fn test_destination_without_basename_fails() {
        let err =
            FileDownloader::destination("https://ocw.mit.edu/courses/x/", Path::new("d"))
                .unwrap_err();
        assert!(matches!(err, DownloadError::NoFileName { .. }));
    }

    #[tokio::test]
    async fn test_download_skips_existing_file_without_request() {
        let temp = tempfile::TempDir::new().unwrap();
        let existing = temp.path().join("notes1.pdf");
        std::fs::write(&existing, b"old").unwrap();

        // Port 9 (discard) would fail any real request; the skip must happen first.
        let downloader = FileDownloader::new(Client::new(), Duration::from_secs(1));
        let outcome = downloader
            .download("http://127.0.0.1:9/notes1.pdf", temp.path())
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::Skipped { path: existing.clone() });
        assert_eq!(std::fs::read(&existing).unwrap(), b"old");
    }
}
