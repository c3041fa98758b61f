//! PDF downloads to disk.
//!
//! # Features
//!
//! - File named after the last URL path segment
//! - Existing files are skipped without any request
//! - One retry over HTTPS when an `http://` download fails
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use ocw_core::download::FileDownloader;
//! use ocw_core::fetch::build_http_client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = FileDownloader::new(build_http_client()?, Duration::from_secs(20));
//! let outcome = downloader
//!     .download("https://ocw.mit.edu/courses/example-course/notes1.pdf", Path::new("./downloads"))
//!     .await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod downloader;
mod error;
mod filename;

pub use downloader::{DownloadOutcome, FileDownloader};
pub use error::DownloadError;
pub use filename::{https_fallback_url, url_basename};
