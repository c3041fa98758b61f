//! Page fetching and the parsed [`Page`] document.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use super::FetchError;

/// Compiles a CSS selector at static init; panics on invalid pattern.
pub(crate) fn compile_static_selector(pattern: &str) -> Selector {
    Selector::parse(pattern).unwrap_or_else(|e| panic!("invalid static selector '{pattern}': {e}"))
}

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("a"));

/// An anchor element as seen by link collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<'a> {
    /// Raw `href` attribute, if present.
    pub href: Option<&'a str>,
    /// Concatenated visible text of the anchor and its descendants.
    pub text: String,
}

/// A fetched HTML page, parsed once and discarded after link extraction.
#[derive(Debug)]
pub struct Page {
    url: Url,
    document: Html,
}

impl Page {
    /// Parses `html` as the document found at `url`.
    #[must_use]
    pub fn parse(url: Url, html: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(html),
        }
    }

    /// The URL this page was requested from; relative links resolve against it.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All anchors in document order.
    pub fn anchors(&self) -> impl Iterator<Item = Anchor<'_>> {
        self.anchors_matching(&ANCHOR)
    }

    /// Anchors matching `selector`, in document order.
    pub fn anchors_matching<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = Anchor<'a>> + 'a {
        self.document.select(selector).map(|element| Anchor {
            href: element.value().attr("href"),
            text: element.text().collect(),
        })
    }

    /// Resolves `href` against the page URL into an absolute URL.
    #[must_use]
    pub fn resolve(&self, href: &str) -> Option<String> {
        match self.url.join(href.trim()) {
            Ok(resolved) => Some(resolved.into()),
            Err(error) => {
                debug!(href, error = %error, "skipping unresolvable link");
                None
            }
        }
    }
}

/// Result of a page fetch.
///
/// Only [`FetchOutcome::Page`] carries a document; the other variants mean
/// "nothing here" to every caller and are never treated as fatal.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was fetched and parsed.
    Page(Page),
    /// The server answered with a non-2xx status.
    NotFound {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The request failed before a status was available.
    Failed(FetchError),
}

impl FetchOutcome {
    /// Returns the parsed page, discarding failure details.
    #[must_use]
    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Page(page) => Some(page),
            Self::NotFound { .. } | Self::Failed(_) => None,
        }
    }

    /// Returns true if a page was fetched.
    #[must_use]
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

/// Fetches HTML pages with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Creates a fetcher that shares `client` and applies `timeout` per request.
    #[must_use]
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetches and parses `url`.
    ///
    /// Every failure is reported through the returned [`FetchOutcome`];
    /// this method never errors.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(error) => return FetchOutcome::Failed(FetchError::invalid_url(url, error)),
        };

        let response = match self
            .client
            .get(parsed.clone())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                let error = FetchError::from_request(url, error);
                debug!(error = %error, "page fetch failed");
                return FetchOutcome::Failed(error);
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "page returned error status");
            return FetchOutcome::NotFound {
                url: url.to_string(),
                status: status.as_u16(),
            };
        }

        match response.text().await {
            Ok(body) => {
                debug!(bytes = body.len(), "page fetched");
                FetchOutcome::Page(Page::parse(parsed, &body))
            }
            Err(error) => {
                let error = FetchError::from_request(url, error);
                debug!(error = %error, "page body read failed");
                FetchOutcome::Failed(error)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page(url: &str, html: &str) -> Page {
        Page::parse(Url::parse(url).unwrap(), html)
    }

    #[test]
    fn test_page_anchors_in_document_order() {
        let page = page(
            "https://ocw.mit.edu/courses/x/pages/lecture-notes/",
            r#"<html><body>
                <a href="a.pdf">First</a>
                <a>No href</a>
                <a href="/b"><span>Second</span> link</a>
            </body></html>"#,
        );
        let anchors: Vec<_> = page.anchors().collect();
        assert_eq!(anchors.len(), 3);
        assert_eq!(anchors[0].href, Some("a.pdf"));
        assert_eq!(anchors[1].href, None);
        assert_eq!(anchors[2].text, "Second link");
    }

    #[test]
    fn test_page_resolve_relative_and_absolute() {
        let page = page("https://ocw.mit.edu/courses/x/pages/lecture-notes/", "");
        assert_eq!(
            page.resolve("notes1.pdf").unwrap(),
            "https://ocw.mit.edu/courses/x/pages/lecture-notes/notes1.pdf"
        );
        assert_eq!(
            page.resolve("/courses/x/resources/y.pdf").unwrap(),
            "https://ocw.mit.edu/courses/x/resources/y.pdf"
        );
        assert_eq!(
            page.resolve("  http://other.example/z.pdf ").unwrap(),
            "http://other.example/z.pdf"
        );
    }

    #[test]
    fn test_fetch_outcome_into_page() {
        let outcome = FetchOutcome::NotFound {
            url: "https://example.com/".to_string(),
            status: 404,
        };
        assert!(!outcome.is_page());
        assert!(outcome.into_page().is_none());

        let outcome = FetchOutcome::Page(page("https://example.com/", "<p>hi</p>"));
        assert!(outcome.is_page());
        assert!(outcome.into_page().is_some());
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_failed_outcome() {
        let fetcher = PageFetcher::new(Client::new(), Duration::from_secs(1));
        let outcome = fetcher.fetch("not a url").await;
        assert!(matches!(
            outcome,
            FetchOutcome::Failed(FetchError::InvalidUrl { .. })
        ));
    }
}
