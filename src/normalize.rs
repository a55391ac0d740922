//! Content normalization: raw portal markup to a constrained vocabulary.
//!
//! The portal's rich-text editor produces wildly inconsistent markup. This
//! stage walks the content container's direct children and rewrites each one
//! into the small output vocabulary the site template can style uniformly:
//! paragraphs, images-as-links, captioned anchors, and plain flowed text.
//! Child transformations are independent of each other; output preserves
//! document order.

use dom_query::Selection;
use tracing::debug;

use crate::config::SiteConfig;
use crate::dedup;

/// CSS class carried by flattened headings and kept by the site stylesheet.
pub const PARAGRAPH_CLASS: &str = "news-paragraph";

/// Rewrite the children of a content container into the constrained
/// vocabulary, then collapse duplicate hyperlinks in the concatenated result.
#[must_use]
pub fn normalize_content(container: &Selection, config: &SiteConfig) -> String {
    let Some(root) = container.nodes().first() else {
        return String::new();
    };

    let mut out = String::new();
    for child in root.children() {
        if child.is_element() {
            let el = Selection::from(child);
            let tag = el
                .nodes()
                .first()
                .and_then(dom_query::NodeRef::node_name)
                .map(|t| t.to_ascii_lowercase())
                .unwrap_or_default();

            match tag.as_str() {
                "img" => push_image(&el, config, &mut out),
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => push_flattened_heading(&el, &mut out),
                "a" => push_anchor(&el, &mut out),
                _ => push_stripped(&el, &mut out),
            }
        } else if child.is_text() {
            // Flowed text between elements passes through, entity-escaped.
            out.push_str(&escape_html(&child.text()));
        }
    }

    dedup::remove_duplicate_links(&out)
}

/// Image child: emit a clickable anchor wrapping the image, target opened in
/// a new browsing context. The `src` is absolutized against the portal host
/// unless it already carries a scheme.
fn push_image(el: &Selection, config: &SiteConfig, out: &mut String) {
    let Some(src) = el.attr("src") else {
        debug!("dropping img child without src attribute");
        return;
    };
    let src = config.absolutize(&src);
    out.push_str(&format!(
        r#"<a href="{src}" target="_blank"><img src="{src}" style="max-width:100%; height:auto;" alt="Image"/></a>"#
    ));
}

/// Heading child: flatten to a fixed-class paragraph, text only.
fn push_flattened_heading(el: &Selection, out: &mut String) {
    let text = el.text();
    out.push_str(&format!(
        r#"<p class="{PARAGRAPH_CLASS}">{}</p>"#,
        escape_html(text.trim())
    ));
}

/// Anchor child: re-emit with `target="_blank"` and the original visible text.
fn push_anchor(el: &Selection, out: &mut String) {
    let href = el.attr("href").map(|h| h.to_string()).unwrap_or_default();
    let text = el.text();
    out.push_str(&format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        escape_html(&href),
        escape_html(text.trim())
    ));
}

/// Any other element: strip its attributes and serialize as-is.
fn push_stripped(el: &Selection, out: &mut String) {
    clear_attributes(el);
    out.push_str(&el.html());
}

/// Remove every attribute from a selection's first node.
fn clear_attributes(el: &Selection) {
    let names: Vec<String> = el
        .nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| attr.name.local.to_string())
                .collect()
        })
        .unwrap_or_default();
    for name in names {
        el.remove_attr(&name);
    }
}

/// Minimal HTML entity escaping for text emitted into the fragment.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::LINK_CAPTION;
    use dom_query::Document;

    fn normalize(html: &str) -> String {
        let doc = Document::from(html);
        normalize_content(&doc.select("div.Content"), &SiteConfig::default())
    }

    #[test]
    fn headings_flatten_to_fixed_class_paragraphs() {
        let out = normalize(
            r#"<div class="Content"><h2 style="font-size:30px">Swim Meet</h2><h5>Details</h5></div>"#,
        );
        assert_eq!(
            out,
            r#"<p class="news-paragraph">Swim Meet</p><p class="news-paragraph">Details</p>"#
        );
    }

    #[test]
    fn no_heading_tags_or_styles_survive() {
        let out = normalize(
            r#"<div class="Content"><h1>A</h1><p style="color:red">B</p><h6>C</h6></div>"#,
        );
        for level in 1..=6 {
            assert!(!out.contains(&format!("<h{level}")));
        }
        assert!(!out.contains("style="));
    }

    #[test]
    fn image_becomes_clickable_absolutized_link() {
        // The dedup pass rewrites the anchor's contents to the fixed caption,
        // so the wrapped <img> does not survive normalization.
        let out = normalize(r#"<div class="Content"><img src="/media/photo.jpg"></div>"#);
        assert_eq!(
            out,
            format!(
                r#"<a href="http://www.gomotionapp.com/media/photo.jpg" target="_blank">{LINK_CAPTION}</a>"#
            )
        );
    }

    #[test]
    fn absolute_image_src_is_kept() {
        let out = normalize(r#"<div class="Content"><img src="https://cdn.example.com/p.png"></div>"#);
        assert!(out.contains(r#"href="https://cdn.example.com/p.png""#));
    }

    #[test]
    fn anchors_open_in_new_context_and_are_captioned() {
        let out = normalize(
            r#"<div class="Content"><a href="https://x.test/form" class="btn">Sign up here</a></div>"#,
        );
        // The dedup pass re-captions surviving anchors.
        assert_eq!(
            out,
            format!(r#"<a href="https://x.test/form" target="_blank">{LINK_CAPTION}</a>"#)
        );
    }

    #[test]
    fn other_elements_lose_all_attributes() {
        let out = normalize(
            r#"<div class="Content"><p style="margin:0" align="center" data-x="1">Hello</p></div>"#,
        );
        assert_eq!(out, "<p>Hello</p>");
    }

    #[test]
    fn flowed_text_between_elements_is_kept() {
        let out = normalize(r#"<div class="Content"><p>One</p> and two <p>Three</p></div>"#);
        assert!(out.contains("<p>One</p>"));
        assert!(out.contains(" and two "));
        assert!(out.contains("<p>Three</p>"));
    }

    #[test]
    fn duplicate_links_collapse_within_the_container() {
        let out = normalize(
            r#"<div class="Content"><a href="https://x.test/a">one</a><a href="https://x.test/a">two</a></div>"#,
        );
        assert_eq!(out.matches("<a href=").count(), 1);
    }

    #[test]
    fn empty_selection_yields_empty_fragment() {
        let doc = Document::from("<div>no content container</div>");
        let out = normalize_content(&doc.select("div.Content"), &SiteConfig::default());
        assert!(out.is_empty());
    }
}
