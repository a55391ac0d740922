//! Feed assembly: ordering articles and rendering the embeddable fragment.

use std::cmp::Reverse;

use chrono::NaiveDate;
use tracing::info;

use crate::article::Article;
use crate::config::SiteConfig;
use crate::dedup;
use crate::format;

/// Sort articles by publication date, newest first.
///
/// Articles with the unknown-date sentinel (or an unparseable date) sort
/// last; the sort is stable, so ties keep their input order.
pub fn sort_by_date_desc(articles: &mut [Article]) {
    articles.sort_by_key(|article| Reverse(article.parsed_date().unwrap_or(NaiveDate::MIN)));
}

/// Render every article into the fixed item template, in feed order.
///
/// Per item, all anchor texts are first rewritten to the fixed caption
/// (unconditionally, on a copy of the summary), then the full rewrite
/// sequence is applied. No article is skipped; sentinel fields render
/// as-is.
#[must_use]
pub fn render_feed(articles: &[Article], config: &SiteConfig) -> String {
    info!(count = articles.len(), "rendering news feed");
    let mut out = String::new();
    for article in articles {
        let captioned = dedup::caption_links(&article.summary);
        let formatted = format::format_summary(&captioned, config);
        out.push_str(&format!(
            r#"
        <div class="news-item">
            <h2 class="news-title"><strong>{title}</strong></h2>
            <p class="news-date">Author: {author}</p>
            <p class="news-date">Published on {date}</p>
            <div class="news-content">{formatted}</div>
        </div>
        "#,
            title = article.title,
            author = article.author,
            date = article.date,
        ));
    }
    out
}

/// Sort and render in one step.
#[must_use]
pub fn assemble_feed(mut articles: Vec<Article>, config: &SiteConfig) -> String {
    sort_by_date_desc(&mut articles);
    render_feed(&articles, config)
}
