//! OCW Downloader Core Library
//!
//! This library discovers and downloads the PDF material (lecture notes,
//! assignments) published on MIT OpenCourseWare course pages.
//!
//! # Architecture
//!
//! The pipeline runs leaf-first:
//! - [`course`] - Course identifiers and slug extraction
//! - [`fetch`] - Page fetching and HTML parsing
//! - [`collector`] - PDF link discovery strategies
//! - [`section`] - Candidate sub-path probing per section
//! - [`download`] - File downloads with HTTP to HTTPS fallback
//! - [`orchestrator`] - Drives all of the above per course and section
//!
//! Supporting modules:
//! - [`config`] - Run configuration (courses, sections, timeouts)
//! - [`rename`] - Lecture file renaming utility

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod config;
pub mod course;
pub mod download;
pub mod fetch;
pub mod orchestrator;
pub mod rename;
pub mod section;
mod user_agent;

// Re-export commonly used types
pub use collector::{PdfLinkCollector, Strategy, SuffixMatch};
pub use config::{ConfigError, FileConfig, OcwConfig, Section};
pub use course::{Course, SlugError, extract_slug};
pub use download::{DownloadError, DownloadOutcome, FileDownloader};
pub use fetch::{FetchError, FetchOutcome, Page, PageFetcher, build_http_client};
pub use orchestrator::{CourseOrchestrator, CourseReport, RunReport, SectionReport};
pub use rename::{RenameError, RenameReport, rename_lectures};
pub use section::{SectionResolution, SectionResolver};
