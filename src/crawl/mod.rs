// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Features:
// - Depth-bounded recursive crawling from a start URL
// - One tokio task per discovered link, all joined before returning
// - Each URL fetched at most once per session, even when branches race
// - Fetch failures are reported and pruned, never propagated
//
// Submodules:
// - engine: the `Crawler` session and the `crawl` entry point
// - table: the dedup table of per-URL fetch slots
// - observation: found/failed events and the final report
// =============================================================================

mod engine;
mod observation;
mod table;

pub use engine::{crawl, Crawler};
pub use observation::{CrawlReport, FailedFetch, FoundPage, Observation};
pub use table::{DedupTable, TableStats};
