//! End-to-end pipeline tests over an in-memory transport.

use std::collections::HashMap;

use portal_news_sync::fetch::Fetcher;
use portal_news_sync::{run_pipeline, Error, Result, SiteConfig};

struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| ((*url).to_string(), (*body).to_string()))
                .collect(),
        }
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.pages
            .get(url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| Error::Config(format!("no stub page for {url}")))
    }
}

fn config() -> SiteConfig {
    SiteConfig {
        portal_base: "http://portal.test".to_string(),
        news_url: "http://portal.test/news".to_string(),
        ..SiteConfig::default()
    }
}

const DOCUMENT: &str = "<html>\n<body>\n<!-- START UNDER HERE -->\nstale content\n<!-- END AUTOMATION SCRIPT -->\n</body>\n</html>";

fn article_page(title: &str, epoch_millis: Option<&str>, body: &str) -> String {
    let date_span = epoch_millis
        .map(|ms| format!(r#"<span class="DateStr" data="{ms}"></span>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="NewsItem"><h1>{title}</h1>{date_span}
           <div class="Author"><strong>Coach</strong></div>
           <div class="Content">{body}</div></div>"#
    )
}

#[test]
fn full_run_replaces_the_managed_region() {
    // June 2, 2024 and May 1, 2024, listed oldest-first on the portal.
    let older = article_page("Older News", Some("1714521600000"), "<p>old body</p>");
    let newer = article_page("Newer News", Some("1717286400000"), "<p>new body</p>");
    let listing = r#"
        <div class="Item"><a href="/news/older">x</a></div>
        <div class="Item"><a href="/news/newer">x</a></div>"#;

    let fetcher = StubFetcher::new(&[
        ("http://portal.test/news", listing),
        ("http://portal.test/news/older", &older),
        ("http://portal.test/news/newer", &newer),
    ]);

    let merged = match run_pipeline(&fetcher, DOCUMENT, &config()) {
        Ok(merged) => merged,
        Err(e) => panic!("expected Ok(_), got Err({e:?})"),
    };

    assert!(!merged.contains("stale content"));
    assert!(merged.starts_with("<html>\n<body>\n<!-- START UNDER HERE -->\n"));
    assert!(merged.ends_with("<!-- END AUTOMATION SCRIPT -->\n</body>\n</html>"));

    // Date-descending order: the newer article renders first.
    let newer_pos = merged.find("Newer News");
    let older_pos = merged.find("Older News");
    assert!(newer_pos.is_some() && older_pos.is_some());
    assert!(newer_pos < older_pos);

    assert!(merged.contains("Published on June 02, 2024"));
    assert!(merged.contains("Published on May 01, 2024"));
}

#[test]
fn failed_article_renders_as_placeholder_item() {
    let listing = r#"
        <div class="Item"><a href="/news/good">x</a></div>
        <div class="Item"><a href="/news/gone">x</a></div>"#;
    let good = article_page("Good", Some("1717286400000"), "<p>fine</p>");

    let fetcher = StubFetcher::new(&[
        ("http://portal.test/news", listing),
        ("http://portal.test/news/good", &good),
        // /news/gone missing: its fetch fails.
    ]);

    let merged = match run_pipeline(&fetcher, DOCUMENT, &config()) {
        Ok(merged) => merged,
        Err(e) => panic!("expected Ok(_), got Err({e:?})"),
    };

    assert!(merged.contains("<strong>Good</strong>"));
    assert!(merged.contains("<strong>Error fetching title</strong>"));
    assert!(merged.contains("Error fetching content."));
    // Undated placeholder sorts after the dated article.
    assert!(merged.find("Good") < merged.find("Error fetching title"));
}

#[test]
fn empty_feed_aborts_before_merging() {
    let fetcher = StubFetcher::new(&[("http://portal.test/news", "<div>no items</div>")]);
    let result = run_pipeline(&fetcher, DOCUMENT, &config());
    assert!(matches!(result, Err(Error::EmptyFeed)));
}

#[test]
fn missing_marker_aborts_without_output() {
    let listing = r#"<div class="Item"><a href="/news/a">x</a></div>"#;
    let page = article_page("A", None, "<p>body</p>");
    let fetcher = StubFetcher::new(&[
        ("http://portal.test/news", listing),
        ("http://portal.test/news/a", &page),
    ]);

    let doc_without_end = "<html><!-- START UNDER HERE --></html>";
    let result = run_pipeline(&fetcher, doc_without_end, &config());
    assert!(matches!(result, Err(Error::MarkerNotFound(_))));
}

#[test]
fn summaries_are_normalized_and_captioned_in_the_output() {
    let body = r#"
        <h2 style="font-size:40px">Sign Ups</h2>
        <a href="https://forms.test/signup">Register here</a>
        <a href="https://forms.test/signup">Register again</a>
        <img src="/media/flyer.jpg">"#;
    let listing = r#"<div class="Item"><a href="/news/a">x</a></div>"#;
    let page = article_page("Sign Ups", Some("1717286400000"), body);

    let fetcher = StubFetcher::new(&[
        ("http://portal.test/news", listing),
        ("http://portal.test/news/a", &page),
    ]);

    let merged = match run_pipeline(&fetcher, DOCUMENT, &config()) {
        Ok(merged) => merged,
        Err(e) => panic!("expected Ok(_), got Err({e:?})"),
    };

    let managed: &str = {
        let start = merged.find("<!-- START UNDER HERE -->").unwrap_or(0);
        let end = merged.find("<!-- END AUTOMATION SCRIPT -->").unwrap_or(merged.len());
        &merged[start..end]
    };

    // The article's heading flattened to the fixed paragraph class and its
    // inline style is gone; the only <h2> left is the item template's own.
    assert!(managed.contains(r#"<p class="news-paragraph">Sign Ups</p>"#));
    assert!(!managed.contains("font-size"));
    assert_eq!(managed.matches("<h2").count(), 1);
    // The duplicated registration link collapsed to a single anchor; the
    // image anchor is a second, distinct target. Both carry the caption.
    assert_eq!(
        managed.matches("Click here to be redirected to the link").count(),
        2
    );
    assert_eq!(managed.matches("forms.test/signup").count(), 1);
    // The image anchor's target was absolutized against the portal host.
    assert!(managed.contains(r#"href="http://portal.test/media/flyer.jpg""#));
}
