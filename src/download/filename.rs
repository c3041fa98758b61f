//! URL string helpers for naming and re-fetching downloads.

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Final `/`-separated segment of a URL string, used as the file name.
///
/// Returns `None` for URLs ending in `/` and for `.`/`..` segments.
#[must_use]
pub fn url_basename(url: &str) -> Option<&str> {
    let name = url.rsplit('/').next()?;
    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        return None;
    }
    Some(name)
}

/// The `https://` equivalent of an `http://` URL.
///
/// Only the leading scheme token is replaced; the prefix check ignores ASCII
/// case. Any other URL yields `None`.
#[must_use]
pub fn https_fallback_url(url: &str) -> Option<String> {
    let prefix = url.get(..HTTP_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(HTTP_PREFIX) {
        return None;
    }
    Some(format!("{HTTPS_PREFIX}{}", &url[HTTP_PREFIX.len()..]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_basename_last_segment() {
        assert_eq!(
            url_basename("https://ocw.mit.edu/courses/x/resources/notes1.pdf"),
            Some("notes1.pdf")
        );
        assert_eq!(url_basename("notes2.pdf"), Some("notes2.pdf"));
    }

    #[test]
    fn test_url_basename_rejects_directory_and_dot_segments() {
        assert_eq!(url_basename("https://ocw.mit.edu/courses/x/"), None);
        assert_eq!(url_basename("https://ocw.mit.edu/courses/.."), None);
        assert_eq!(url_basename("https://ocw.mit.edu/courses/."), None);
        assert_eq!(url_basename("https://ocw.mit.edu/a\\b.pdf"), None);
    }

    #[test]
    fn test_https_fallback_rewrites_only_leading_scheme() {
        assert_eq!(
            https_fallback_url("http://ocw.mit.edu/mirror/http://x.pdf").unwrap(),
            "https://ocw.mit.edu/mirror/http://x.pdf"
        );
        assert_eq!(
            https_fallback_url("HTTP://ocw.mit.edu/a.pdf").unwrap(),
            "https://ocw.mit.edu/a.pdf"
        );
    }

    #[test]
    fn test_https_fallback_none_for_other_schemes() {
        assert_eq!(https_fallback_url("https://ocw.mit.edu/a.pdf"), None);
        assert_eq!(https_fallback_url("ftp://ocw.mit.edu/a.pdf"), None);
        assert_eq!(https_fallback_url("http:/"), None);
    }
}
