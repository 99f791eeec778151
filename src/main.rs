// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, RUST_LOG or --verbose)
// 3. Build the fetcher for the chosen subcommand and run the crawl,
//    printing observations while it runs
// 4. Print the summary (or the JSON report)
// 5. Exit with proper code (0 = all fetched, 1 = some fetches failed, 2 = error)
//
// The demo site links to a page it doesn't have on purpose, so `demo`
// reports that failure but still exits with 0.
// =============================================================================

mod cli;
mod report;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use link_crawler::{CrawlReport, Crawler, FakeFetcher, Fetcher, HttpFetcher, HttpFetcherConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl {
            start_url,
            max_depth,
            json,
            same_domain,
            timeout_secs,
            user_agent,
        } => {
            let mut config = HttpFetcherConfig {
                timeout: Duration::from_secs(timeout_secs),
                same_domain,
                ..Default::default()
            };
            if let Some(user_agent) = user_agent {
                config.user_agent = user_agent;
            }

            let fetcher = HttpFetcher::new(config)?;
            let report = run_crawl(&start_url, max_depth, fetcher, json).await?;
            Ok(exit_code(&report, true))
        }
        Commands::Demo {
            start,
            max_depth,
            json,
        } => {
            let report = run_crawl(&start, max_depth, FakeFetcher::golang(), json).await?;
            Ok(exit_code(&report, false))
        }
    }
}

// Runs one crawl session while a second task prints what it observes
async fn run_crawl<F: Fetcher>(
    start: &str,
    depth: usize,
    fetcher: F,
    json: bool,
) -> Result<CrawlReport> {
    let (crawler, events) = Crawler::new(fetcher);
    let printer = tokio::spawn(report::stream_observations(events, !json));

    log::info!("crawling {} to depth {}", start, depth);
    crawler.crawl(start, depth).await;
    let stats = crawler.stats().await;

    // Last sender goes away here, which lets the printer finish
    drop(crawler);
    let observations = printer.await?;

    let report = CrawlReport::from_observations(observations, stats);
    report::print_report(&report, json)?;
    Ok(report)
}

// Exit code 1 = some pages could not be fetched, when that counts as failure
fn exit_code(report: &CrawlReport, failures_are_errors: bool) -> i32 {
    if failures_are_errors && report.has_failures() {
        1
    } else {
        0
    }
}
