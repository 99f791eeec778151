// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl real websites over HTTP(S)
// - demo: crawl the built-in golang.org sample site, no network needed
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "link-crawler",
    version,
    about = "A concurrent, depth-bounded web crawler",
    long_about = "link-crawler follows links from a start page up to a maximum depth, \
                  fetching every page at most once and reporting what it found."
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website over HTTP(S)
    ///
    /// Example: link-crawler crawl https://example.com --max-depth 2
    Crawl {
        /// URL to start crawling from
        start_url: String,

        /// Maximum crawl depth
        ///
        /// Depth 1 = just the starting page
        /// Depth 2 = starting page + all pages it links to
        /// Depth 0 = nothing is fetched
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Only follow links on the same domain as the page they appear on
        #[arg(long)]
        same_domain: bool,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// User-Agent header to send (defaults to link-crawler/<version>)
        #[arg(long)]
        user_agent: Option<String>,
    },

    /// Crawl the built-in golang.org sample site
    ///
    /// Example: link-crawler demo --max-depth 4
    Demo {
        /// Page of the sample site to start from
        #[arg(long, default_value = "https://golang.org/")]
        start: String,

        /// Maximum crawl depth
        #[arg(long, default_value_t = 4)]
        max_depth: usize,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why usize for --max-depth?
//    - A depth can't be negative; clap rejects "-1" before we ever see it
//    - 0 is still allowed and simply crawls nothing
//
// 2. What does global = true do on --verbose?
//    - The flag is accepted before or after the subcommand name
//    - `link-crawler -v demo` and `link-crawler demo -v` both work
// -----------------------------------------------------------------------------
