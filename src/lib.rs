// src/lib.rs

//! A concurrent, depth-bounded web crawler.
//!
//! Hand [`crawl`] a start URL, a depth and any [`Fetcher`]; it visits every
//! page reachable within that depth, fetching each URL at most once, and
//! returns a [`CrawlReport`] of what it found.

pub mod crawl;
pub mod error;
pub mod fetch;

pub use crawl::{crawl, CrawlReport, Crawler, Observation};
pub use error::FetchError;
pub use fetch::{FakeFetcher, FetchResult, Fetcher, HttpFetcher, HttpFetcherConfig, Page};
