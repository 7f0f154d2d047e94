// src/fetch/mod.rs
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, warn};
use url::Url;

use crate::shows::ShowSpec;

static WIKI_BASE: &str = "https://en.wikipedia.org/wiki/";

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("tvscraper/", env!("CARGO_PKG_VERSION"));

/// Source of raw page markup, keyed by show spec. Production fetches over
/// HTTP; tests substitute fixture markup.
pub trait PageSource {
    fn fetch_page(&self, spec: &ShowSpec) -> Result<String>;
}

/// Build the episode-list page URL for a show slug.
pub fn episode_page_url(slug: &str) -> Result<Url> {
    let base = Url::parse(WIKI_BASE)?;
    base.join(&format!("List_of_{}_episodes", slug))
        .with_context(|| format!("failed to build page URL for {}", slug))
}

/// Blocking HTTP fetcher with a bounded retry loop around transient
/// failures. Non-success HTTP statuses are not retried.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(HttpFetcher { client })
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&self, spec: &ShowSpec) -> Result<String> {
        let url = episode_page_url(&spec.slug)?;
        let mut attempt = 0;

        // retry loop
        loop {
            attempt += 1;

            let resp = self.client.get(url.as_str()).send();
            match resp {
                Ok(resp) if resp.status().is_success() => match resp.text() {
                    Ok(html) => {
                        debug!(show = %spec.id, bytes = html.len(), "fetched page");
                        return Ok(html);
                    }
                    Err(_) if attempt < MAX_RETRIES => {
                        warn!(show = %spec.id, attempt, "body read failed; retrying");
                        thread::sleep(RETRY_DELAY);
                    }
                    Err(e) => return Err(e.into()),
                },
                Err(_) if attempt < MAX_RETRIES => {
                    warn!(show = %spec.id, attempt, "request failed; retrying");
                    thread::sleep(RETRY_DELAY);
                }
                Ok(resp) => {
                    return Err(anyhow::anyhow!("HTTP error for {}: {}", url, resp.status()))
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
