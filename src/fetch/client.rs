//! Shared HTTP client construction.
//!
//! One [`reqwest::Client`] serves both page fetches and file downloads;
//! per-request timeouts are applied by the callers.

use std::time::Duration;

use reqwest::Client;

use super::FetchError;
use crate::user_agent;

/// Connect timeout applied to every request.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds the shared HTTP client.
///
/// # Errors
///
/// Returns [`FetchError::Client`] when the TLS backend or system
/// configuration prevents building a client.
pub fn build_http_client() -> Result<Client, FetchError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
        .build()
        .map_err(|source| FetchError::Client { source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_succeeds() {
        assert!(build_http_client().is_ok());
    }
}
