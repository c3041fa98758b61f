//! Page fetching: HTTP GET plus HTML parsing.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ocw_core::fetch::{PageFetcher, build_http_client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = PageFetcher::new(build_http_client()?, Duration::from_secs(10));
//! if let Some(page) = fetcher
//!     .fetch("https://ocw.mit.edu/courses/example-course/pages/lecture-notes/")
//!     .await
//!     .into_page()
//! {
//!     println!("{} anchors", page.anchors().count());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod page;

pub use client::{CONNECT_TIMEOUT_SECS, build_http_client};
pub use error::FetchError;
pub use page::{Anchor, FetchOutcome, Page, PageFetcher};

pub(crate) use page::compile_static_selector;
