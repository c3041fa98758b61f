//! Link scans over a single parsed page.
//!
//! Each function reads one [`Page`] and returns absolute URLs; none of them
//! touch the network.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::Selector;

use crate::fetch::{Page, compile_static_selector};

const PDF_SUFFIX: &str = ".pdf";

/// Styled download controls, used when no anchor reads "download file".
static DOWNLOAD_STYLED: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("a.button.download, a.download"));

/// How the direct scan compares the `.pdf` suffix of an `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixMatch {
    /// Only a literal lowercase `.pdf` suffix matches.
    #[default]
    Exact,
    /// `.pdf`, `.PDF`, `.Pdf`, ... all match.
    IgnoreCase,
}

impl SuffixMatch {
    fn matches(self, href: &str) -> bool {
        match self {
            Self::Exact => href.ends_with(PDF_SUFFIX),
            Self::IgnoreCase => ends_with_ignore_case(href, PDF_SUFFIX),
        }
    }
}

fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value.len() >= suffix.len()
        && value
            .get(value.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Every anchor whose `href` ends in `.pdf`, resolved against the page.
///
/// Duplicates are kept in document order.
#[must_use]
pub fn direct_pdf_links(page: &Page, suffix: SuffixMatch) -> Vec<String> {
    page.anchors()
        .filter_map(|anchor| anchor.href)
        .filter(|href| suffix.matches(href))
        .filter_map(|href| page.resolve(href))
        .collect()
}

/// Anchors whose visible text mentions "pdf", resolved against the page.
///
/// These lead to detail pages that hold the actual file links.
#[must_use]
pub fn pdf_text_links(page: &Page) -> Vec<String> {
    page.anchors()
        .filter(|anchor| contains_ignore_case(&anchor.text, "pdf"))
        .filter_map(|anchor| anchor.href)
        .filter_map(|href| page.resolve(href))
        .collect()
}

/// Same-course links that are not themselves PDFs, deduplicated in
/// first-seen order.
///
/// `course_marker` is the `/courses/<slug>/` path fragment.
#[must_use]
pub fn course_detail_links(page: &Page, course_marker: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    page.anchors()
        .filter_map(|anchor| anchor.href)
        .filter_map(|href| page.resolve(href))
        .filter(|url| url.contains(course_marker) && !ends_with_ignore_case(url, PDF_SUFFIX))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// The download control on a detail page, resolved against the page.
///
/// The first anchor whose text contains "download file" wins; only when no
/// such anchor exists is the first styled download anchor used. A winning
/// anchor without an `href` yields `None`.
#[must_use]
pub fn download_button_link(page: &Page) -> Option<String> {
    let button = page
        .anchors()
        .find(|anchor| contains_ignore_case(&anchor.text, "download file"))
        .or_else(|| page.anchors_matching(&DOWNLOAD_STYLED).next())?;
    button.href.and_then(|href| page.resolve(href))
}
