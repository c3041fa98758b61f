//! Run configuration: courses, sections and their candidate sub-paths.
//!
//! The configuration is an explicit value handed to the orchestrator. It is
//! built from defaults, optionally overlaid with a JSON file
//! ([`FileConfig`]), and finally with CLI flags by the binary.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::collector::Strategy;

/// Site root that course URLs are built under.
pub const DEFAULT_BASE_URL: &str = "https://ocw.mit.edu";

/// Root directory for downloaded files.
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// Timeout for HTML page fetches.
pub const PAGE_TIMEOUT_SECS: u64 = 10;

/// Timeout for PDF fetches (larger payloads than HTML pages).
pub const FILE_TIMEOUT_SECS: u64 = 20;

/// Courses processed when neither the config file nor the CLI names any.
pub const DEFAULT_COURSES: &[&str] = &["18-712-introduction-to-representation-theory-fall-2010"];

const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=3600;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for string input.
        origin: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A value is outside its accepted range or shape.
    #[error("invalid config value for `{field}`: {message}")]
    Invalid {
        /// Offending key.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A named category of course material and where to look for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name, also used as the destination directory name.
    pub name: String,
    /// Candidate sub-paths under the course base URL, probed in order.
    pub sub_paths: Vec<String>,
    /// Collection strategies applied to each probed page, in priority order.
    pub strategies: Vec<Strategy>,
}

impl Section {
    /// Creates a section using every collection strategy.
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, sub_paths: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            sub_paths: sub_paths.into_iter().map(Into::into).collect(),
            strategies: Strategy::ALL.to_vec(),
        }
    }

    /// Restricts the section to the given strategies.
    #[must_use]
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }
}

/// Built-in section table.
#[must_use]
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::new(
            "lecture_notes",
            ["pages/lecture-notes", "resources/lecture-notes"],
        ),
        Section::new(
            "assignments",
            [
                "pages/assignments",
                "pages/problem-sets",
                "resources/problem-sets",
                "pages/lists/problem-sets",
                "pages/exams",
            ],
        ),
    ]
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct OcwConfig {
    /// Site root, e.g. `https://ocw.mit.edu`.
    pub base_url: String,
    /// Downloads land in `<output_dir>/<slug>/<section>/`.
    pub output_dir: PathBuf,
    /// Per-request timeout for HTML pages.
    pub page_timeout: Duration,
    /// Per-request timeout for PDF files.
    pub file_timeout: Duration,
    /// Match `.PDF`/`.Pdf` hrefs as well as `.pdf` in the direct link scan.
    pub pdf_suffix_ignore_case: bool,
    /// Course identifiers (bare slugs or course URLs).
    pub courses: Vec<String>,
    /// Sections processed for every course, in order.
    pub sections: Vec<Section>,
}

impl Default for OcwConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            page_timeout: Duration::from_secs(PAGE_TIMEOUT_SECS),
            file_timeout: Duration::from_secs(FILE_TIMEOUT_SECS),
            pdf_suffix_ignore_case: false,
            courses: DEFAULT_COURSES.iter().map(|c| (*c).to_string()).collect(),
            sections: default_sections(),
        }
    }
}

impl OcwConfig {
    /// Loads a JSON config file and overlays it on the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })?;
        Self::default().merge_file(file)
    }

    /// Parses JSON config text and overlays it on the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })?;
        Self::default().merge_file(file)
    }

    /// Overlays file values onto `self` and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is out of range or a
    /// strategy override names an unknown section.
    pub fn merge_file(mut self, file: FileConfig) -> Result<Self, ConfigError> {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(output_dir) = file.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(secs) = file.page_timeout_secs {
            self.page_timeout = timeout_from_secs("page_timeout_secs", secs)?;
        }
        if let Some(secs) = file.file_timeout_secs {
            self.file_timeout = timeout_from_secs("file_timeout_secs", secs)?;
        }
        if let Some(ignore_case) = file.pdf_suffix_ignore_case {
            self.pdf_suffix_ignore_case = ignore_case;
        }
        if let Some(courses) = file.courses {
            self.courses = courses;
        }
        if let Some(section_paths) = file.section_paths {
            self.sections = section_paths
                .into_iter()
                .map(|(name, paths)| Section::new(name, paths))
                .collect();
        }
        for (name, strategies) in file.section_strategies {
            let Some(section) = self.sections.iter_mut().find(|s| s.name == name) else {
                return Err(ConfigError::invalid(
                    "section_strategies",
                    format!("unknown section '{name}'"),
                ));
            };
            section.strategies = strategies;
        }

        self.validate()?;
        Ok(self)
    }

    /// Keeps only the named sections, in configured order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a name matches no configured section.
    pub fn retain_sections(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.sections.iter().any(|s| &s.name == *name))
        {
            return Err(ConfigError::invalid(
                "section",
                format!("unknown section '{unknown}'"),
            ));
        }
        self.sections.retain(|s| names.contains(&s.name));
        Ok(())
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }
        for (field, timeout) in [
            ("page_timeout_secs", self.page_timeout),
            ("file_timeout_secs", self.file_timeout),
        ] {
            timeout_from_secs(field, timeout.as_secs())?;
        }
        if self.courses.is_empty() {
            return Err(ConfigError::invalid("courses", "at least one course is required"));
        }
        if self.sections.is_empty() {
            return Err(ConfigError::invalid(
                "section_paths",
                "at least one section is required",
            ));
        }
        for section in &self.sections {
            if section.sub_paths.is_empty() {
                return Err(ConfigError::invalid(
                    "section_paths",
                    format!("section '{}' has no candidate sub-paths", section.name),
                ));
            }
            if section.strategies.is_empty() {
                return Err(ConfigError::invalid(
                    "section_strategies",
                    format!("section '{}' has no collection strategies", section.name),
                ));
            }
            if section.name.is_empty() || section.name.contains(['/', '\\']) || section.name == ".." {
                return Err(ConfigError::invalid(
                    "section_paths",
                    format!("section name '{}' is not a valid directory name", section.name),
                ));
            }
        }
        Ok(())
    }
}

fn timeout_from_secs(field: &str, secs: u64) -> Result<Duration, ConfigError> {
    if !TIMEOUT_RANGE_SECS.contains(&secs) {
        return Err(ConfigError::invalid(
            field,
            format!("{secs}. Expected range: 1..=3600"),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// JSON config file shape. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Site root.
    pub base_url: Option<String>,
    /// Download root directory.
    pub output_dir: Option<PathBuf>,
    /// HTML page timeout in seconds.
    pub page_timeout_secs: Option<u64>,
    /// PDF file timeout in seconds.
    pub file_timeout_secs: Option<u64>,
    /// Case-insensitive `.pdf` suffix matching.
    pub pdf_suffix_ignore_case: Option<bool>,
    /// Course identifiers.
    pub courses: Option<Vec<String>>,
    /// Section name to candidate sub-paths, in document order.
    #[serde(default, deserialize_with = "ordered_section_paths")]
    pub section_paths: Option<Vec<(String, Vec<String>)>>,
    /// Per-section strategy overrides.
    #[serde(default)]
    pub section_strategies: HashMap<String, Vec<Strategy>>,
}

/// Reads a JSON object into `(name, paths)` pairs, keeping key order.
fn ordered_section_paths<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<(String, Vec<String>)>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedSections;

    impl<'de> Visitor<'de> for OrderedSections {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of section name to a list of sub-paths")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut sections: Vec<(String, Vec<String>)> = Vec::new();
            while let Some((name, paths)) = map.next_entry::<String, Vec<String>>()? {
                if sections.iter().any(|(existing, _)| *existing == name) {
                    return Err(de::Error::custom(format!("duplicate section '{name}'")));
                }
                sections.push((name, paths));
            }
            Ok(sections)
        }
    }

    deserializer.deserialize_map(OrderedSections).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OcwConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "https://ocw.mit.edu");
        assert_eq!(config.output_dir, PathBuf::from("downloads"));
        assert_eq!(config.page_timeout, Duration::from_secs(10));
        assert_eq!(config.file_timeout, Duration::from_secs(20));
        assert!(!config.pdf_suffix_ignore_case);
    }

    #[test]
    fn test_default_sections_order() {
        let names: Vec<_> = default_sections().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["lecture_notes", "assignments"]);
        let lecture = &default_sections()[0];
        assert_eq!(
            lecture.sub_paths,
            ["pages/lecture-notes", "resources/lecture-notes"]
        );
        assert_eq!(lecture.strategies, Strategy::ALL);
    }

    #[test]
    fn test_from_json_keeps_section_order() {
        let config = OcwConfig::from_json_str(
            r#"{
                "courses": ["example-course"],
                "section_paths": {
                    "zeta": ["pages/zeta"],
                    "alpha": ["pages/alpha", "resources/alpha"]
                }
            }"#,
        )
        .unwrap();
        let names: Vec<_> = config.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(config.sections[1].sub_paths, ["pages/alpha", "resources/alpha"]);
        assert_eq!(config.courses, ["example-course"]);
    }

    #[test]
    fn test_from_json_empty_object_uses_defaults() {
        let config = OcwConfig::from_json_str("{}").unwrap();
        assert_eq!(config.sections, default_sections());
        assert_eq!(config.courses.len(), DEFAULT_COURSES.len());
    }

    #[test]
    fn test_from_json_strategy_override() {
        let config = OcwConfig::from_json_str(
            r#"{"section_strategies": {"assignments": ["download_button"]}}"#,
        )
        .unwrap();
        let assignments = config
            .sections
            .iter()
            .find(|s| s.name == "assignments")
            .unwrap();
        assert_eq!(assignments.strategies, [Strategy::DownloadButton]);
    }

    #[test]
    fn test_from_json_strategy_override_unknown_section_rejected() {
        let err = OcwConfig::from_json_str(r#"{"section_strategies": {"exams": ["direct_link"]}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown section 'exams'"), "{err}");
    }

    #[test]
    fn test_from_json_duplicate_section_rejected() {
        let err = OcwConfig::from_json_str(
            r#"{"section_paths": {"notes": ["a"], "notes": ["b"]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_json_unknown_key_rejected() {
        let err = OcwConfig::from_json_str(r#"{"concurrency": 4}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_timeout_out_of_range_rejected() {
        let err = OcwConfig::from_json_str(r#"{"page_timeout_secs": 0}"#).unwrap_err();
        assert!(err.to_string().contains("page_timeout_secs"), "{err}");
        let err = OcwConfig::from_json_str(r#"{"file_timeout_secs": 3601}"#).unwrap_err();
        assert!(err.to_string().contains("file_timeout_secs"), "{err}");
    }

    #[test]
    fn test_section_without_paths_rejected() {
        let err = OcwConfig::from_json_str(r#"{"section_paths": {"notes": []}}"#).unwrap_err();
        assert!(err.to_string().contains("no candidate sub-paths"), "{err}");
    }

    #[test]
    fn test_base_url_scheme_required() {
        let err = OcwConfig::from_json_str(r#"{"base_url": "ocw.mit.edu"}"#).unwrap_err();
        assert!(err.to_string().contains("base_url"), "{err}");
    }

    #[test]
    fn test_retain_sections_filters_in_configured_order() {
        let mut config = OcwConfig::default();
        config
            .retain_sections(&["assignments".to_string()])
            .unwrap();
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].name, "assignments");
    }

    #[test]
    fn test_retain_sections_unknown_name_rejected() {
        let mut config = OcwConfig::default();
        let err = config.retain_sections(&["exams".to_string()]).unwrap_err();
        assert!(err.to_string().contains("exams"));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = OcwConfig::load(Path::new("/nonexistent/ocw/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ocw/config.json"));
    }
}
