// src/error.rs
// =============================================================================
// The one error the crawl engine knows about: a fetch that failed.
//
// The engine never creates these itself. A fetcher produces them, the engine
// stores them in the dedup table and reports them as observations, unchanged.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed fetch for a single URL.
///
/// Displays as the bare reason (e.g. `not found: https://golang.org/cmd/`),
/// which already names the URL for the fetchers in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{reason}")]
pub struct FetchError {
    /// The URL whose fetch failed
    pub url: String,
    /// Human readable reason
    pub reason: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Failure for a URL the fetcher has no page for.
    pub fn not_found(url: &str) -> Self {
        Self::new(url, format!("not found: {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_reason() {
        let err = FetchError::not_found("https://golang.org/cmd/");
        assert_eq!(err.to_string(), "not found: https://golang.org/cmd/");
        assert_eq!(err.url, "https://golang.org/cmd/");
    }
}
