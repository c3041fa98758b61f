//! Course identifiers and slug extraction.
//!
//! A course is configured either as a bare slug
//! (`18-712-introduction-to-representation-theory-fall-2010`) or as a full
//! course URL (`https://ocw.mit.edu/courses/<slug>/pages/syllabus/`). Both
//! normalize to the same [`Course`].

use std::fmt;

use thiserror::Error;
use url::Url;

/// Path segment that precedes the slug in every course URL.
const COURSES_SEGMENT: &str = "courses";

/// Errors produced when a course identifier cannot be turned into a slug.
///
/// These are configuration errors: the run aborts before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// The identifier looked like a URL but could not be parsed.
    #[error("invalid course URL '{input}': {reason}")]
    InvalidUrl {
        /// The rejected identifier.
        input: String,
        /// Parser message.
        reason: String,
    },

    /// The URL path has no `courses` segment, or nothing follows it.
    #[error("course URL '{input}' has no slug after a '/courses/' path segment")]
    MissingCoursesSegment {
        /// The rejected identifier.
        input: String,
    },

    /// A bare slug was empty or contained a path separator.
    #[error("invalid course slug '{input}': must be non-empty and contain no '/'")]
    InvalidSlug {
        /// The rejected identifier.
        input: String,
    },
}

/// Returns true when the identifier carries an HTTP(S) scheme.
fn has_http_scheme(course_id: &str) -> bool {
    course_id.starts_with("http://") || course_id.starts_with("https://")
}

/// Normalizes a course identifier into its slug.
///
/// Bare slugs are returned unchanged. For URLs, the segment following the
/// first `courses` segment of the path is returned.
///
/// # Errors
///
/// Returns [`SlugError`] when a URL has no `courses` segment, when the URL
/// cannot be parsed, or when a bare slug is empty or contains `/`.
pub fn extract_slug(course_id: &str) -> Result<String, SlugError> {
    if !has_http_scheme(course_id) {
        if course_id.is_empty() || course_id.contains('/') {
            return Err(SlugError::InvalidSlug {
                input: course_id.to_string(),
            });
        }
        return Ok(course_id.to_string());
    }

    let parsed = Url::parse(course_id).map_err(|e| SlugError::InvalidUrl {
        input: course_id.to_string(),
        reason: e.to_string(),
    })?;

    let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();
    segments
        .iter()
        .position(|segment| *segment == COURSES_SEGMENT)
        .and_then(|idx| segments.get(idx + 1))
        .filter(|slug| !slug.is_empty())
        .map(|slug| (*slug).to_string())
        .ok_or_else(|| SlugError::MissingCoursesSegment {
            input: course_id.to_string(),
        })
}

/// A course resolved to its canonical slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    slug: String,
}

impl Course {
    /// Parses a course identifier (bare slug or course URL).
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] when the identifier is malformed.
    pub fn parse(course_id: &str) -> Result<Self, SlugError> {
        Ok(Self {
            slug: extract_slug(course_id)?,
        })
    }

    /// The canonical course slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Base URL of the course under the given site, without trailing slash.
    #[must_use]
    pub fn base_url(&self, site: &str) -> String {
        format!(
            "{}/{COURSES_SEGMENT}/{}",
            site.trim_end_matches('/'),
            self.slug
        )
    }

    /// Path fragment that every same-course link contains.
    #[must_use]
    pub fn path_marker(&self) -> String {
        format!("/{COURSES_SEGMENT}/{}/", self.slug)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug)
    }
}
