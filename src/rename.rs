//! Lecture file renamer.
//!
//! Turns downloaded names such as `MIT18_712F10_lec5.1.pdf` into
//! `Klute - Lecture 5.1.pdf`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

/// Default prefix for renamed lecture files.
pub const DEFAULT_PREFIX: &str = "Klute";

static LECTURE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)_lec(\d{1,2}\.\d)")
        .unwrap_or_else(|e| panic!("invalid static regex for lecture numbers: {e}"))
});

/// Errors raised while scanning or renaming.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The directory could not be listed.
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        /// Directory being scanned.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A rename failed.
    #[error("cannot rename {from} to {to}: {source}")]
    Rename {
        /// Source path.
        from: PathBuf,
        /// Target path.
        to: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// What the renamer did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// `(old, new)` file names that were renamed (or would be, in a dry run).
    pub renamed: Vec<(String, String)>,
    /// Files whose target name already existed.
    pub skipped_existing: Vec<String>,
    /// PDFs without a lecture number.
    pub ignored: Vec<String>,
}

/// New name for a lecture PDF, or `None` if `file_name` is not one.
#[must_use]
pub fn lecture_target_name(file_name: &str, prefix: &str) -> Option<String> {
    if !has_pdf_extension(file_name) {
        return None;
    }
    let number = LECTURE_NUMBER_RE.captures(file_name)?.get(1)?.as_str();
    Some(format!("{prefix} - Lecture {number}.pdf"))
}

fn has_pdf_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Renames every lecture PDF in `dir`.
///
/// Entries are processed in name order. With `dry_run`, nothing on disk
/// changes but the report is the same.
///
/// # Errors
///
/// Returns [`RenameError`] if the directory cannot be read or a rename fails.
pub fn rename_lectures(dir: &Path, prefix: &str, dry_run: bool) -> Result<RenameReport, RenameError> {
    let read_dir_err = |source| RenameError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        if entry.file_type().map_err(read_dir_err)?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    let mut report = RenameReport::default();
    let mut claimed: HashSet<String> = HashSet::new();
    for old in names {
        if !has_pdf_extension(&old) {
            continue;
        }
        let Some(new) = lecture_target_name(&old, prefix) else {
            info!(file = %old, "ignoring, no lecture number");
            report.ignored.push(old);
            continue;
        };

        let from = dir.join(&old);
        let to = dir.join(&new);
        if to.exists() || claimed.contains(&new) {
            warn!(file = %old, target = %new, "target exists, skipping");
            report.skipped_existing.push(old);
            continue;
        }

        if !dry_run {
            std::fs::rename(&from, &to).map_err(|source| RenameError::Rename {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
        }
        info!(from = %old, to = %new, dry_run, "renamed");
        claimed.insert(new.clone());
        report.renamed.push((old, new));
    }
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_lecture_target_name_matches() {
        assert_eq!(
            lecture_target_name("MIT18_712F10_lec5.1.pdf", DEFAULT_PREFIX).unwrap(),
            "Klute - Lecture 5.1.pdf"
        );
        assert_eq!(
            lecture_target_name("notes_LEC10.2.PDF", "Etingof").unwrap(),
            "Etingof - Lecture 10.2.pdf"
        );
    }

    #[test]
    fn test_lecture_target_name_rejects_non_matching() {
        assert!(lecture_target_name("syllabus.pdf", DEFAULT_PREFIX).is_none());
        assert!(lecture_target_name("x_lec5.pdf", DEFAULT_PREFIX).is_none());
        assert!(lecture_target_name("x_lec5.1.txt", DEFAULT_PREFIX).is_none());
    }

    #[test]
    fn test_rename_lectures_renames_and_reports() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a_lec0.3.pdf"), b"a").unwrap();
        std::fs::write(temp.path().join("syllabus.pdf"), b"s").unwrap();
        std::fs::write(temp.path().join("readme.txt"), b"r").unwrap();

        let report = rename_lectures(temp.path(), DEFAULT_PREFIX, false).unwrap();

        assert_eq!(
            report.renamed,
            [("a_lec0.3.pdf".to_string(), "Klute - Lecture 0.3.pdf".to_string())]
        );
        assert_eq!(report.ignored, ["syllabus.pdf"]);
        assert!(temp.path().join("Klute - Lecture 0.3.pdf").exists());
        assert!(!temp.path().join("a_lec0.3.pdf").exists());
        assert!(temp.path().join("readme.txt").exists());
    }

    #[test]
    fn test_rename_lectures_skips_existing_target() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a_lec1.1.pdf"), b"new").unwrap();
        std::fs::write(temp.path().join("Klute - Lecture 1.1.pdf"), b"old").unwrap();

        let report = rename_lectures(temp.path(), DEFAULT_PREFIX, false).unwrap();

        assert!(report.renamed.is_empty());
        assert_eq!(report.skipped_existing, ["a_lec1.1.pdf"]);
        assert_eq!(
            std::fs::read(temp.path().join("Klute - Lecture 1.1.pdf")).unwrap(),
            b"old"
        );
    }

    #[test]
    fn test_rename_lectures_dry_run_leaves_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a_lec2.1.pdf"), b"a").unwrap();
        std::fs::write(temp.path().join("b_lec2.1.pdf"), b"b").unwrap();

        let report = rename_lectures(temp.path(), DEFAULT_PREFIX, true).unwrap();

        assert_eq!(report.renamed.len(), 1);
        assert_eq!(report.skipped_existing, ["b_lec2.1.pdf"]);
        assert!(temp.path().join("a_lec2.1.pdf").exists());
        assert!(!temp.path().join("Klute - Lecture 2.1.pdf").exists());
    }

    #[test]
    fn test_rename_lectures_missing_dir() {
        let err = rename_lectures(Path::new("/nonexistent/lectures"), DEFAULT_PREFIX, false)
            .unwrap_err();
        assert!(matches!(err, RenameError::ReadDir { .. }));
    }
}
