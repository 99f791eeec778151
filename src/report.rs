// src/report.rs
// =============================================================================
// Prints a crawl, either as JSON or as plain text lines.
//
// In table mode each observation is printed the moment it arrives:
//
//   found: https://golang.org/ "The Go Programming Language"
//   failed: https://golang.org/cmd/ not found: https://golang.org/cmd/
//
// and a short summary follows once the crawl has finished. In JSON mode
// nothing is printed until the whole report is ready.
//
// Rust concepts:
// - mpsc receivers: the crawl pushes observations, this module pulls them
// - Iterators over chars: for truncating text without splitting UTF-8
// =============================================================================

use anyhow::Result;
use link_crawler::{CrawlReport, Observation};
use tokio::sync::mpsc::UnboundedReceiver;

// Bodies of real pages are whole HTML documents; keep the table readable
const MAX_BODY_CHARS: usize = 60;

// Reads observations until every sender is gone
//
// Parameters:
//   events: the receiver handed out by `Crawler::new`
//   live: print each observation as it arrives (table mode)
//
// Returns: every observation, in arrival order
pub async fn stream_observations(
    mut events: UnboundedReceiver<Observation>,
    live: bool,
) -> Vec<Observation> {
    let mut observations = Vec::new();
    while let Some(observation) = events.recv().await {
        if live {
            println!("{}", render_observation(&observation));
        }
        observations.push(observation);
    }
    observations
}

// Prints the finished report
//
// The table lines were already streamed, so table mode only adds the summary
pub fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_summary(report));
    }
    Ok(())
}

fn render_observation(observation: &Observation) -> String {
    match observation {
        Observation::Found { url, body } => format!("found: {} {:?}", url, truncate(body)),
        Observation::FetchFailed { url, reason } => format!("failed: {} {}", url, reason),
    }
}

fn render_summary(report: &CrawlReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("📊 Summary:\n");
    out.push_str(&format!("   ✅ Pages: {}\n", report.found.len()));
    out.push_str(&format!("   ❌ Failed: {}\n", report.failed.len()));
    out.push_str(&format!(
        "   🌐 Fetches: {} ({} reused)\n",
        report.stats.fetches, report.stats.hits
    ));
    out
}

fn truncate(body: &str) -> String {
    // Count chars, not bytes, so we never split a UTF-8 sequence
    if body.chars().count() > MAX_BODY_CHARS {
        let head: String = body.chars().take(MAX_BODY_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why stream instead of printing at the end?
//    - A deep crawl can take a long time on the real web
//    - Printing as observations arrive shows progress right away
//    - Repeat visits of the same page show up again in the stream; the
//      summary counts each URL once
//
// 2. When does stream_observations stop?
//    - recv() returns None once every sender has been dropped
//    - Each Crawler clone holds a sender, so the caller drops its crawler
//      after the crawl returns and the loop ends on its own
// -----------------------------------------------------------------------------
