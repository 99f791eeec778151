// src/crawl/observation.rs
// =============================================================================
// What a crawl tells the outside world.
//
// Every branch that gets past the depth check emits exactly one observation:
// either the page it found or the reason its fetch failed. Observations from
// different branches arrive in no particular order.
// =============================================================================

use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;

use super::table::TableStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    /// A page was resolved (freshly fetched or reused from the table)
    Found { url: String, body: String },
    /// The fetch for `url` failed
    FetchFailed { url: String, reason: String },
}

impl Observation {
    pub fn url(&self) -> &str {
        match self {
            Observation::Found { url, .. } | Observation::FetchFailed { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundPage {
    pub url: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFetch {
    pub url: String,
    pub reason: String,
}

/// Summary of a finished crawl, one entry per URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub found: Vec<FoundPage>,
    pub failed: Vec<FailedFetch>,
    pub stats: TableStats,
}

impl CrawlReport {
    /// Builds a report from observations in arrival order.
    ///
    /// A URL reached through several paths is observed several times; only
    /// the first observation for each URL is kept.
    pub fn from_observations(
        observations: impl IntoIterator<Item = Observation>,
        stats: TableStats,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut report = CrawlReport {
            stats,
            ..Default::default()
        };

        for observation in observations {
            if !seen.insert(observation.url().to_string()) {
                continue;
            }
            match observation {
                Observation::Found { url, body } => report.found.push(FoundPage { url, body }),
                Observation::FetchFailed { url, reason } => {
                    report.failed.push(FailedFetch { url, reason })
                }
            }
        }

        report
    }

    /// Drains whatever is already queued on `events`.
    ///
    /// Call after the crawl has returned; every branch has emitted by then.
    pub fn drain(events: &mut UnboundedReceiver<Observation>, stats: TableStats) -> Self {
        let mut observations = Vec::new();
        while let Ok(observation) = events.try_recv() {
            observations.push(observation);
        }
        Self::from_observations(observations, stats)
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(url: &str, body: &str) -> Observation {
        Observation::Found {
            url: url.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_report_keeps_first_observation_per_url() {
        let observations = vec![
            found("a", "A"),
            found("b", "B"),
            found("a", "A"),
            Observation::FetchFailed {
                url: "c".to_string(),
                reason: "not found: c".to_string(),
            },
            Observation::FetchFailed {
                url: "c".to_string(),
                reason: "not found: c".to_string(),
            },
        ];

        let report = CrawlReport::from_observations(observations, TableStats::default());
        let urls: Vec<_> = report.found.iter().map(|page| page.url.as_str()).collect();

        assert_eq!(urls, vec!["a", "b"]);
        assert_eq!(report.failed.len(), 1);
        assert!(report.has_failures());
    }

    #[test]
    fn test_observation_json_shape() {
        let json = serde_json::to_value(found("a", "A")).unwrap();
        assert_eq!(json["kind"], "found");
        assert_eq!(json["url"], "a");
    }

    #[tokio::test]
    async fn test_drain_collects_queued_events() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(found("a", "A")).unwrap();
        tx.send(found("b", "B")).unwrap();

        let report = CrawlReport::drain(&mut rx, TableStats::default());
        assert_eq!(report.found.len(), 2);
        assert!(!report.has_failures());
    }
}
