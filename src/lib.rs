//! # portal-news-sync
//!
//! Ingests loosely structured, vendor-authored HTML news articles from a
//! third-party sports-team portal and converts them into a normalized, safe,
//! visually uniform HTML fragment embedded into a static page.
//!
//! The core is the content extraction and sanitization pipeline: one raw
//! article page becomes a structured [`Article`], and a list of articles
//! becomes merged, de-duplicated, style-normalized HTML spliced into the
//! managed region of the target document. Everything around that (HTTP
//! transport, repository sync) is a thin collaborator.
//!
//! ## Quick Start
//!
//! ```rust
//! use portal_news_sync::{merge, parser, feed, SiteConfig};
//!
//! let config = SiteConfig::default();
//! let article = parser::parse_article(
//!     r#"<div class="NewsItem"><h1>Title</h1>
//!        <div class="Content"><p>Body</p></div></div>"#,
//!     &config,
//! );
//! let fragment = feed::assemble_feed(vec![article], &config);
//! let document = "a<!-- START UNDER HERE -->old<!-- END AUTOMATION SCRIPT -->b";
//! let merged = merge::merge_managed_region(document, &fragment, &config)?;
//! assert!(merged.contains("Title"));
//! # Ok::<(), portal_news_sync::Error>(())
//! ```

mod config;
mod error;
mod patterns;

/// The `Article` record, sentinels, and per-article outcomes.
pub mod article;

/// Hyperlink de-duplication and captioning.
pub mod dedup;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Portal fetching: HTTP collaborator and listing walk.
pub mod fetch;

/// Feed ordering and rendering.
pub mod feed;

/// Summary formatting as an ordered table of named rewrite steps.
pub mod format;

/// Managed-region replacement in the target document.
pub mod merge;

/// Content normalization into the constrained output vocabulary.
pub mod normalize;

/// Article extraction from one fetched page.
pub mod parser;

/// Repository sync collaborator.
pub mod repo;

// Public API - re-exports
pub use article::{Article, ArticleOutcome};
pub use config::SiteConfig;
pub use error::{Error, Result};

use fetch::Fetcher;
use tracing::warn;

/// Run the full pipeline against an already-loaded target document.
///
/// Fetches the feed through `fetcher`, aborts on an empty feed or missing
/// markers (before any output is produced), and otherwise returns the
/// updated document. Placeholder articles count toward the feed and render
/// with their sentinels.
pub fn run_pipeline(
    fetcher: &dyn Fetcher,
    document: &str,
    config: &SiteConfig,
) -> Result<String> {
    let outcomes = fetch::fetch_feed(fetcher, config)?;
    if outcomes.is_empty() {
        return Err(Error::EmptyFeed);
    }

    let placeholders = outcomes.iter().filter(|o| o.is_placeholder()).count();
    if placeholders > 0 {
        warn!(placeholders, "some articles could not be fetched");
    }

    let articles: Vec<Article> = outcomes.into_iter().map(ArticleOutcome::into_article).collect();
    let fragment = feed::assemble_feed(articles, config);
    merge::merge_managed_region(document, &fragment, config)
}
