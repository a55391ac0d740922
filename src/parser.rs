//! Article extraction from one fetched portal page.
//!
//! A missing sub-element is a per-field soft default, never a failure:
//! parsing always yields a fully populated [`Article`]. Transport failures
//! are handled one level up (see `fetch`), where they become the uniform
//! error placeholder.

use chrono::DateTime;
use dom_query::Document;
use tracing::warn;

use crate::article::{Article, CONTENT_UNAVAILABLE, DATE_FORMAT, NO_TITLE, UNKNOWN_AUTHOR, UNKNOWN_DATE};
use crate::config::SiteConfig;
use crate::normalize;

/// Extract a structured [`Article`] from a fetched article page.
#[must_use]
pub fn parse_article(html: &str, config: &SiteConfig) -> Article {
    let doc = Document::from(html);

    let title = {
        let heading = doc.select("div.NewsItem h1");
        let text = heading.text().trim().to_string();
        if text.is_empty() {
            warn!("article heading missing; using title sentinel");
            NO_TITLE.to_string()
        } else {
            text
        }
    };

    let date = match doc.select("span.DateStr").attr("data") {
        Some(raw) => format_epoch_millis(&raw).unwrap_or_else(|| {
            warn!(raw = %raw, "unparseable date attribute; using date sentinel");
            UNKNOWN_DATE.to_string()
        }),
        None => {
            warn!("date element missing; using date sentinel");
            UNKNOWN_DATE.to_string()
        }
    };

    let author = {
        let byline = doc.select("div.Author strong");
        let text = byline.text().trim().to_string();
        if text.is_empty() {
            warn!("author byline missing; using author sentinel");
            UNKNOWN_AUTHOR.to_string()
        } else {
            text
        }
    };

    let content = doc.select("div.Content");
    let summary = if content.exists() {
        normalize::normalize_content(&content, config)
    } else {
        warn!("content container missing; using content sentinel");
        CONTENT_UNAVAILABLE.to_string()
    };

    Article {
        title,
        date,
        author,
        summary,
    }
}

/// Format an epoch-millisecond timestamp attribute as `Month Day, Year` (UTC).
fn format_epoch_millis(raw: &str) -> Option<String> {
    let millis: i64 = raw.trim().parse().ok()?;
    let timestamp = DateTime::from_timestamp_millis(millis)?;
    Some(timestamp.format(DATE_FORMAT).to_string())
}
