// src/fetch/fake.rs
// =============================================================================
// A fetcher that serves canned pages from memory.
//
// Used by the `demo` command and by the engine tests. It counts every call so
// tests can check that the crawler fetched each URL at most once, and it can
// pretend to be slow so that several branches race on the same URL.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::{FetchResult, Fetcher, Page};
use crate::error::FetchError;

/// In-memory link graph: URL -> page.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Page>,
    latency: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page to the graph.
    pub fn page(mut self, url: &str, body: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|link| link.to_string()).collect();
        self.pages.insert(url.to_string(), Page::new(body, links));
        self
    }

    /// Makes every fetch sleep for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The sample golang.org site. Note that /cmd/ is linked but has no page.
    pub fn golang() -> Self {
        Self::new()
            .page(
                "https://golang.org/",
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"],
            )
            .page(
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ],
            )
            .page(
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
            .page(
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
    }

    /// How many times `url` has been fetched.
    pub fn calls(&self, url: &str) -> usize {
        self.lock_calls().get(url).copied().unwrap_or(0)
    }

    /// How many fetches have been made in total.
    pub fn total_calls(&self) -> usize {
        self.lock_calls().values().sum()
    }

    // A panic while holding the lock can't leave the counts half-written
    fn lock_calls(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        *self.lock_calls().entry(url.to_string()).or_insert(0) += 1;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::not_found(url))
    }
}
