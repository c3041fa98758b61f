//! Shared User-Agent string for page and file requests.
//!
//! Page fetches and PDF downloads go through the same client, so a single
//! identifying string is enough.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/ocw-downloader";

/// Default User-Agent for all requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("ocw-downloader/{version} (course-archive-tool; +{PROJECT_UA_URL})")
}
