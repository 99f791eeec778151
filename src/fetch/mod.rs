// src/fetch/mod.rs
// =============================================================================
// The fetch capability: turns a URL into a page body plus the URLs it links to.
//
// The crawl engine only ever talks to the `Fetcher` trait, so it can run
// against the real web (`HttpFetcher`) or a canned link graph (`FakeFetcher`).
//
// Submodules:
// - fake: in-memory pages, used by the demo command and the tests
// - http: real HTTP(S) retrieval and HTML link extraction
// =============================================================================

mod fake;
mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub use fake::FakeFetcher;
pub use http::{HttpFetcher, HttpFetcherConfig};

/// A fetched page: its body and the links found on it, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub body: String,
    pub links: Vec<String>,
}

impl Page {
    pub fn new(body: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// The outcome of resolving one URL. Stored once per URL per crawl.
pub type FetchResult = Result<Page, FetchError>;

/// Anything that can resolve a URL to a page.
///
/// Implementations are called concurrently from many crawl branches and must
/// not rely on any state shared between calls other than their own.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch(&self, url: &str) -> FetchResult;
}

// Lets a caller keep a handle on the fetcher (to read call counts, say)
// while the crawler owns another one.
#[async_trait]
impl<T: Fetcher> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult {
        (**self).fetch(url).await
    }
}
