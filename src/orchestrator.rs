//! Course orchestration: resolve sections, then download their PDFs.
//!
//! Courses, sections and files are processed strictly one after another.

use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::collector::{PdfLinkCollector, SuffixMatch};
use crate::config::{OcwConfig, Section};
use crate::course::{Course, SlugError};
use crate::download::{DownloadOutcome, FileDownloader};
use crate::fetch::{FetchError, PageFetcher, build_http_client};
use crate::section::{SectionResolution, SectionResolver};

/// Per-section result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionReport {
    /// Section name.
    pub name: String,
    /// Winning sub-path, `None` when the section was not found.
    pub sub_path: Option<String>,
    /// Destination directory, `None` when the section was not found.
    pub dest_dir: Option<PathBuf>,
    /// Files written during this run.
    pub saved: usize,
    /// Files already present on disk.
    pub skipped: usize,
    /// PDF URLs that could not be downloaded.
    pub failed: Vec<String>,
}

impl SectionReport {
    /// Returns true when a candidate sub-path produced PDF links.
    #[must_use]
    pub fn found(&self) -> bool {
        self.sub_path.is_some()
    }
}

/// Per-course result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseReport {
    /// Course slug.
    pub slug: String,
    /// Sections in configured order.
    pub sections: Vec<SectionReport>,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Courses in configured order.
    pub courses: Vec<CourseReport>,
}

impl RunReport {
    fn sections(&self) -> impl Iterator<Item = &SectionReport> {
        self.courses.iter().flat_map(|c| c.sections.iter())
    }

    /// Total files written.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.sections().map(|s| s.saved).sum()
    }

    /// Total files skipped because they already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.sections().map(|s| s.skipped).sum()
    }

    /// Total files that failed to download.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.sections().map(|s| s.failed.len()).sum()
    }

    /// Sections for which no candidate sub-path had PDFs.
    #[must_use]
    pub fn sections_not_found(&self) -> usize {
        self.sections().filter(|s| !s.found()).count()
    }
}

/// Drives section resolution and downloads for every configured course.
#[derive(Debug, Clone)]
pub struct CourseOrchestrator {
    config: OcwConfig,
    resolver: SectionResolver,
    downloader: FileDownloader,
}

impl CourseOrchestrator {
    /// Builds the HTTP client and pipeline components from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: OcwConfig) -> Result<Self, FetchError> {
        let client = build_http_client()?;
        let suffix = if config.pdf_suffix_ignore_case {
            SuffixMatch::IgnoreCase
        } else {
            SuffixMatch::Exact
        };
        let fetcher = PageFetcher::new(client.clone(), config.page_timeout);
        let resolver = SectionResolver::new(
            PdfLinkCollector::new(fetcher, suffix),
            config.base_url.clone(),
        );
        let downloader = FileDownloader::new(client, config.file_timeout);
        Ok(Self {
            config,
            resolver,
            downloader,
        })
    }

    /// The configuration this orchestrator runs with.
    #[must_use]
    pub fn config(&self) -> &OcwConfig {
        &self.config
    }

    /// Processes every configured course.
    ///
    /// All course identifiers are validated before the first request.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if any course identifier is malformed. Network
    /// and download failures never surface here; they are counted in the
    /// report.
    pub async fn run(&self) -> Result<RunReport, SlugError> {
        let courses = self
            .config
            .courses
            .iter()
            .map(|id| Course::parse(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = RunReport::default();
        for course in &courses {
            report.courses.push(self.process_course(course).await);
        }
        Ok(report)
    }

    /// Processes every configured section of one course.
    #[instrument(skip(self, course), fields(course = %course))]
    pub async fn process_course(&self, course: &Course) -> CourseReport {
        info!("processing course");
        let mut sections = Vec::with_capacity(self.config.sections.len());
        for section in &self.config.sections {
            sections.push(self.process_section(course, section).await);
        }
        CourseReport {
            slug: course.slug().to_string(),
            sections,
        }
    }

    async fn process_section(&self, course: &Course, section: &Section) -> SectionReport {
        let mut report = SectionReport {
            name: section.name.clone(),
            ..SectionReport::default()
        };

        let (sub_path, pdfs) = match self.resolver.resolve(course, section).await {
            SectionResolution::Found { sub_path, pdfs, .. } => (sub_path, pdfs),
            SectionResolution::NotFound { tried } => {
                warn!(section = %section.name, tried, "section not found");
                return report;
            }
        };

        let dest_dir = self
            .config
            .output_dir
            .join(course.slug())
            .join(&section.name);
        report.sub_path = Some(sub_path);
        report.dest_dir = Some(dest_dir.clone());

        if let Err(e) = tokio::fs::create_dir_all(&dest_dir).await {
            error!(path = %dest_dir.display(), error = %e, "cannot create destination directory");
            report.failed = pdfs;
            return report;
        }

        for pdf in pdfs {
            match self.downloader.download(&pdf, &dest_dir).await {
                Ok(DownloadOutcome::Saved { .. }) => report.saved += 1,
                Ok(DownloadOutcome::Skipped { .. }) => report.skipped += 1,
                Err(e) => {
                    warn!(url = %pdf, error = %e, "download failed");
                    report.failed.push(pdf);
                }
            }
        }

        info!(
            section = %section.name,
            saved = report.saved,
            skipped = report.skipped,
            failed = report.failed.len(),
            "section complete"
        );
        report
    }
}
