//! Section resolution: find the first candidate sub-path that lists PDFs.

use tracing::{info, instrument};

use crate::collector::PdfLinkCollector;
use crate::config::Section;
use crate::course::Course;

/// Outcome of probing a section's candidate sub-paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionResolution {
    /// A candidate produced at least one PDF link.
    Found {
        /// The winning sub-path.
        sub_path: String,
        /// The page URL that was scanned.
        page_url: String,
        /// PDF URLs discovered on that page.
        pdfs: Vec<String>,
    },
    /// No candidate produced any PDF link.
    NotFound {
        /// Number of candidates probed.
        tried: usize,
    },
}

impl SectionResolution {
    /// PDF URLs found, empty when the section was not found.
    #[must_use]
    pub fn pdfs(&self) -> &[String] {
        match self {
            Self::Found { pdfs, .. } => pdfs,
            Self::NotFound { .. } => &[],
        }
    }
}

/// Probes candidate sub-paths for a course section.
#[derive(Debug, Clone)]
pub struct SectionResolver {
    collector: PdfLinkCollector,
    site_url: String,
}

impl SectionResolver {
    /// Creates a resolver that builds course URLs under `site_url`.
    #[must_use]
    pub fn new(collector: PdfLinkCollector, site_url: impl Into<String>) -> Self {
        Self {
            collector,
            site_url: site_url.into(),
        }
    }

    /// URL probed for `sub_path`: `<site>/courses/<slug>/<sub_path>/`.
    #[must_use]
    pub fn candidate_url(&self, course: &Course, sub_path: &str) -> String {
        format!(
            "{}/{}/",
            course.base_url(&self.site_url),
            sub_path.trim_matches('/')
        )
    }

    /// Tries each sub-path of `section` in order; the first with PDFs wins
    /// and later candidates are not requested.
    #[instrument(skip(self, course, section), fields(course = %course, section = %section.name))]
    pub async fn resolve(&self, course: &Course, section: &Section) -> SectionResolution {
        for sub_path in &section.sub_paths {
            let page_url = self.candidate_url(course, sub_path);
            let pdfs = self
                .collector
                .collect(&page_url, course, &section.strategies)
                .await;
            if pdfs.is_empty() {
                info!(sub_path = %sub_path, "no PDFs here");
                continue;
            }
            info!(sub_path = %sub_path, count = pdfs.len(), "section found");
            return SectionResolution::Found {
                sub_path: sub_path.clone(),
                page_url,
                pdfs,
            };
        }
        SectionResolution::NotFound {
            tried: section.sub_paths.len(),
        }
    }
}
