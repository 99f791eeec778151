// src/fetch/http.rs
// =============================================================================
// This module fetches real pages over HTTP(S).
//
// How it works:
// 1. GET the page with a shared reqwest client (timeout + user agent)
// 2. Treat any non-2xx status as a failed fetch
// 3. Parse the HTML with scraper and collect every <a href>
// 4. Resolve relative links against the page URL with the url crate
// 5. Keep only http/https links (optionally only on the page's own domain)
//
// The crawl engine never looks inside URLs, so all link cleanup happens here.
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{FetchResult, Fetcher, Page};
use crate::error::FetchError;

/// Settings for the HTTP fetcher, filled in from the command line.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Only follow links whose domain matches the page they were found on
    pub same_domain: bool,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            same_domain: false,
        }
    }
}

pub struct HttpFetcher {
    client: Client,
    selector: Selector,
    same_domain: bool,
}

impl HttpFetcher {
    pub fn new(config: HttpFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .context("failed to build HTTP client")?;

        let selector =
            Selector::parse("a[href]").map_err(|e| anyhow!("invalid link selector: {}", e))?;

        Ok(Self {
            client,
            selector,
            same_domain: config.same_domain,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(FetchError::new(
                url,
                format!("{}: HTTP {}", url, response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::new(url, format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        let body = self.fetch_page(url).await?;
        // Html isn't Send, so parsing stays in a plain fn after the last await
        let links = extract_links(&self.selector, &body, url, self.same_domain);
        Ok(Page::new(body, links))
    }
}

// Collects the absolute http/https links on a page, in document order.
//
// Parameters:
//   selector: the pre-parsed `a[href]` selector
//   html: the page body
//   page_url: where the page came from (base for relative links)
//   same_domain: drop links that leave the page's domain
fn extract_links(selector: &Selector, html: &str, page_url: &str, same_domain: bool) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("cannot resolve links on {}: {}", page_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);

    document
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(&base, href))
        .filter(|link| matches!(link.scheme(), "http" | "https"))
        .filter(|link| !same_domain || link.domain() == base.domain())
        .map(String::from)
        .collect()
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    base.join(href).ok()
}
