//! Portal fetching: the HTTP collaborator and the listing walk.
//!
//! Fetching is deliberately sequential and synchronous; article counts are
//! small (tens, not thousands) and each article's transformation is
//! independent. The only cross-article dependency is the final date sort,
//! which needs the complete set.
//!
//! The [`Fetcher`] trait is the seam for tests and alternate transports; a
//! transport failure for one article becomes that article's error
//! placeholder, never a batch failure.

use std::time::Duration;

use dom_query::{Document, Selection};
use tracing::{debug, info, warn};

use crate::article::{Article, ArticleOutcome};
use crate::config::SiteConfig;
use crate::encoding;
use crate::error::Result;
use crate::parser;

/// Transport collaborator: fetch one URL's raw bytes.
pub trait Fetcher {
    /// Fetch the resource at `url`, failing on any transport or HTTP error.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher with the portal-friendly user agent.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured per-request timeout.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("Mozilla/5.0")
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Walk the news listing page and fetch every linked article, in page order.
///
/// Listing items carrying the `Supplement` class are skipped, as are items
/// without an article link. A failed article fetch yields the error
/// placeholder outcome; only a failure to fetch the listing itself is a
/// batch error.
pub fn fetch_feed(fetcher: &dyn Fetcher, config: &SiteConfig) -> Result<Vec<ArticleOutcome>> {
    info!(url = %config.news_url, "fetching news listing");
    let bytes = fetcher.fetch(&config.news_url)?;
    let html = encoding::transcode_to_utf8(&bytes);
    let doc = Document::from(html);

    let mut outcomes = Vec::new();
    for node in doc.select("div.Item").nodes() {
        let item = Selection::from(node.clone());
        if item
            .attr("class")
            .is_some_and(|c| c.split_whitespace().any(|cls| cls == "Supplement"))
        {
            debug!("skipping supplement listing item");
            continue;
        }
        let Some(href) = item.select("a").attr("href") else {
            warn!("listing item without article link; skipping");
            continue;
        };
        let article_url = config.absolutize(&href);
        outcomes.push(fetch_article(fetcher, &article_url, config));
    }

    info!(
        total = outcomes.len(),
        placeholders = outcomes.iter().filter(|o| o.is_placeholder()).count(),
        "fetched news feed"
    );
    Ok(outcomes)
}

/// Fetch and parse one article page.
///
/// Transport failure is contained here: the result is always a fully
/// populated outcome.
pub fn fetch_article(fetcher: &dyn Fetcher, url: &str, config: &SiteConfig) -> ArticleOutcome {
    match fetcher.fetch(url) {
        Ok(bytes) => {
            let html = encoding::transcode_to_utf8(&bytes);
            ArticleOutcome::Parsed(parser::parse_article(&html, config))
        }
        Err(e) => {
            warn!(url = %url, error = %e, "article fetch failed; emitting placeholder");
            ArticleOutcome::Placeholder(Article::error_placeholder())
        }
    }
}
