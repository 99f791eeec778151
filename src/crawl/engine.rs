// src/crawl/engine.rs
// =============================================================================
// The crawl engine: depth-bounded, concurrent, fetch-each-URL-once.
//
// How one branch runs:
// 1. Depth 0 ends the branch before anything else happens
// 2. Claim the URL's slot in the dedup table (under the table lock)
// 3. Resolve the slot: the first branch to get there fetches, the rest wait
//    for that fetch and reuse its result
// 4. Emit an observation (found page or failed fetch); a failure ends here
// 5. Spawn one task per link at depth - 1, in link order
// 6. Wait for every child task before returning
//
// A `Crawler` is one crawl session. Clones share the session (fetcher, table,
// observation channel); separate `Crawler::new` calls never see each other.
// =============================================================================

use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::observation::{CrawlReport, Observation};
use super::table::{DedupTable, TableStats};
use crate::fetch::{FetchResult, Fetcher};

pub struct Crawler<F: Fetcher> {
    fetcher: Arc<F>,
    table: Arc<DedupTable>,
    events: UnboundedSender<Observation>,
}

// Derive would demand F: Clone
impl<F: Fetcher> Clone for Crawler<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            table: Arc::clone(&self.table),
            events: self.events.clone(),
        }
    }
}

impl<F: Fetcher> Crawler<F> {
    /// Starts a new session. Observations arrive on the returned receiver.
    pub fn new(fetcher: F) -> (Self, UnboundedReceiver<Observation>) {
        let (events, observations) = mpsc::unbounded_channel();
        let crawler = Self {
            fetcher: Arc::new(fetcher),
            table: Arc::new(DedupTable::new()),
            events,
        };
        (crawler, observations)
    }

    /// Crawls from `url` down to `depth` levels (1 = just `url` itself).
    ///
    /// Returns once every branch spawned for this call has finished.
    pub async fn crawl(&self, url: &str, depth: usize) {
        self.branch(url.to_string(), depth).await
    }

    /// The stored result for `url`, if this session has fetched it.
    pub async fn result(&self, url: &str) -> Option<FetchResult> {
        self.table.get(url).await
    }

    pub async fn stats(&self) -> TableStats {
        self.table.stats().await
    }

    // Boxed so the future can name itself recursively and move into tokio::spawn
    fn branch(&self, url: String, depth: usize) -> BoxFuture<'static, ()> {
        let crawler = self.clone();

        async move {
            // Base case, checked before touching the table
            if depth == 0 {
                return;
            }

            // Claim under the lock, fetch (or wait for the fetch) outside it
            let slot = crawler.table.claim(&url).await;
            let result = crawler
                .table
                .resolve(&slot, || {
                    log::debug!("fetching {}", url);
                    crawler.fetcher.fetch(&url)
                })
                .await;

            // A failed fetch is reported and ends this branch only
            let page = match result {
                Ok(page) => page,
                Err(err) => {
                    log::warn!("fetch failed for {}: {}", url, err);
                    crawler.emit(Observation::FetchFailed {
                        url,
                        reason: err.to_string(),
                    });
                    return;
                }
            };

            crawler.emit(Observation::Found {
                url: url.clone(),
                body: page.body.clone(),
            });

            // Children at depth 0 would return straight away
            if depth == 1 {
                return;
            }

            log::debug!("{} [depth {}]: {} link(s)", url, depth, page.links.len());

            // One task per link, in link order; all of them joined below
            let children: Vec<_> = page
                .links
                .iter()
                .map(|link| tokio::spawn(crawler.branch(link.clone(), depth - 1)))
                .collect();

            for (link, joined) in page.links.iter().zip(join_all(children).await) {
                if let Err(e) = joined {
                    log::warn!("branch for {} did not finish: {}", link, e);
                }
            }
        }
        .boxed()
    }

    fn emit(&self, observation: Observation) {
        if self.events.send(observation).is_err() {
            log::debug!("observation receiver dropped");
        }
    }
}

/// Crawls `start` to `depth` with a fresh session and collects the report.
pub async fn crawl<F: Fetcher>(start: &str, depth: usize, fetcher: F) -> CrawlReport {
    let (crawler, mut events) = Crawler::new(fetcher);

    log::info!("crawling {} to depth {}", start, depth);
    crawler.crawl(start, depth).await;

    let stats = crawler.stats().await;
    log::info!(
        "crawl of {} finished: {} url(s), {} fetch(es), {} reuse(s)",
        start,
        stats.urls,
        stats.fetches,
        stats.hits
    );

    CrawlReport::drain(&mut events, stats)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why BoxFuture?
//    - An async fn that calls itself would have an infinitely sized future
//    - Boxing gives every branch the same, fixed-size type
//    - 'static + Send is what tokio::spawn needs to move it to another thread
//
// 2. Why tokio::spawn per link instead of join_all over plain futures?
//    - Spawned tasks run on any worker thread, so siblings fetch in parallel
//    - A panic inside a task becomes a JoinError for the parent instead of
//      unwinding through it, so one bad page can't take down the crawl
//
// 3. Why does cloning the Crawler start no new session?
//    - All three fields are shared handles (Arc, Arc, channel sender)
//    - Every branch holds a clone, so they all see the same dedup table
//
// 4. Why can't cycles loop forever?
//    - Every child runs at depth - 1, and depth 0 stops immediately
//    - The dedup table only avoids refetching; depth is what ends the crawl
// -----------------------------------------------------------------------------
