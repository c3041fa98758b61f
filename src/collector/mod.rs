//! PDF link discovery on course pages.
//!
//! A listing page is scanned with up to three strategies, in priority order:
//!
//! 1. [`Strategy::DirectLink`] - anchors whose `href` ends in `.pdf`
//! 2. [`Strategy::DetailPage`] - anchors whose text mentions "pdf"; each
//!    target page is fetched and scanned for direct links
//! 3. [`Strategy::DownloadButton`] - same-course links; each target page is
//!    fetched and its single download control is taken
//!
//! The first strategy that yields any URL ends the scan of that page.

mod links;

pub use links::{
    SuffixMatch, course_detail_links, direct_pdf_links, download_button_link, pdf_text_links,
};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::course::Course;
use crate::fetch::{Page, PageFetcher};

/// A link collection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Direct `.pdf` anchors on the page itself.
    DirectLink,
    /// Follow "pdf"-labelled anchors and scan those pages for direct links.
    DetailPage,
    /// Follow same-course anchors and take each page's download control.
    DownloadButton,
}

impl Strategy {
    /// Every strategy, in default priority order.
    pub const ALL: [Self; 3] = [Self::DirectLink, Self::DetailPage, Self::DownloadButton];

    /// Stable name used in config files and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectLink => "direct_link",
            Self::DetailPage => "detail_page",
            Self::DownloadButton => "download_button",
        }
    }
}

/// Links extracted from a listing page before any follow-up request.
///
/// Extraction happens up front so the parsed document is released before
/// secondary pages are fetched.
#[derive(Debug, Default)]
struct ListingScan {
    direct: Vec<String>,
    pdf_labelled: Vec<String>,
    course_pages: Vec<String>,
}

impl ListingScan {
    fn new(page: Page, course: &Course, suffix: SuffixMatch, strategies: &[Strategy]) -> Self {
        let mut scan = Self::default();
        for strategy in strategies {
            match strategy {
                Strategy::DirectLink => scan.direct = direct_pdf_links(&page, suffix),
                Strategy::DetailPage => scan.pdf_labelled = pdf_text_links(&page),
                Strategy::DownloadButton => {
                    scan.course_pages = course_detail_links(&page, &course.path_marker());
                }
            }
        }
        scan
    }
}

/// Collects absolute PDF URLs from course pages.
#[derive(Debug, Clone)]
pub struct PdfLinkCollector {
    fetcher: PageFetcher,
    suffix: SuffixMatch,
}

impl PdfLinkCollector {
    /// Creates a collector that fetches pages through `fetcher`.
    #[must_use]
    pub fn new(fetcher: PageFetcher, suffix: SuffixMatch) -> Self {
        Self { fetcher, suffix }
    }

    /// Fetches `url` and returns the PDF URLs found with `strategies`.
    ///
    /// An unreachable page, or one that no strategy matches, yields an empty
    /// list.
    #[instrument(skip(self, course, strategies), fields(url = %url, course = %course))]
    pub async fn collect(&self, url: &str, course: &Course, strategies: &[Strategy]) -> Vec<String> {
        let Some(page) = self.fetcher.fetch(url).await.into_page() else {
            return Vec::new();
        };
        let scan = ListingScan::new(page, course, self.suffix, strategies);

        for strategy in strategies {
            let found = match strategy {
                Strategy::DirectLink => scan.direct.clone(),
                Strategy::DetailPage => self.follow_detail_pages(&scan.pdf_labelled).await,
                Strategy::DownloadButton => self.follow_download_buttons(&scan.course_pages).await,
            };
            if !found.is_empty() {
                debug!(strategy = strategy.as_str(), count = found.len(), "PDF links found");
                return found;
            }
        }
        Vec::new()
    }

    /// Visits every detail page and accumulates its direct PDF links.
    async fn follow_detail_pages(&self, detail_urls: &[String]) -> Vec<String> {
        let mut pdfs = Vec::new();
        for detail_url in detail_urls {
            let Some(page) = self.fetcher.fetch(detail_url).await.into_page() else {
                continue;
            };
            pdfs.extend(direct_pdf_links(&page, self.suffix));
        }
        pdfs
    }

    /// Visits every detail page and takes at most one download control from each.
    async fn follow_download_buttons(&self, detail_urls: &[String]) -> Vec<String> {
        let mut pdfs = Vec::new();
        for detail_url in detail_urls {
            let Some(page) = self.fetcher.fetch(detail_url).await.into_page() else {
                continue;
            };
            if let Some(pdf) = download_button_link(&page) {
                pdfs.push(pdf);
            }
        }
        pdfs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_all_priority_order() {
        assert_eq!(
            Strategy::ALL,
            [
                Strategy::DirectLink,
                Strategy::DetailPage,
                Strategy::DownloadButton
            ]
        );
    }

    #[test]
    fn test_strategy_deserializes_snake_case() {
        let parsed: Vec<Strategy> =
            serde_json::from_str(r#"["direct_link", "detail_page", "download_button"]"#)
                .unwrap();
        assert_eq!(parsed, Strategy::ALL);
        for strategy in Strategy::ALL {
            let json = format!("\"{}\"", strategy.as_str());
            let back: Strategy = serde_json::from_str(&json).unwrap();
            assert_eq!(back, strategy);
        }
    }
}
