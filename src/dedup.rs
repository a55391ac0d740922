//! Hyperlink de-duplication and captioning.
//!
//! Portal authors routinely paste the same registration link three or four
//! times per article. `remove_duplicate_links` keeps the first occurrence of
//! each target and removes the rest outright; every surviving anchor has its
//! visible text rewritten to the fixed [`LINK_CAPTION`]. `caption_links` is
//! the unconditional re-captioning pass the assembler applies at render time.
//!
//! Matching is exact string equality on `href` values: no trailing-slash,
//! query-string, or case normalization. Anchors are processed in document
//! order so "first occurrence" is well defined.

use std::collections::HashSet;

use dom_query::{Document, Selection};

use crate::article::LINK_CAPTION;

/// Collapse repeated hyperlink targets to a single visible instance.
///
/// Anchors without an `href` are left untouched. Idempotent: applying this
/// twice yields the same fragment as applying it once.
#[must_use]
pub fn remove_duplicate_links(fragment: &str) -> String {
    let doc = Document::from(fragment);
    let mut seen: HashSet<String> = HashSet::new();

    for node in doc.select("a[href]").nodes() {
        let anchor = Selection::from(node.clone());
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        if seen.insert(href.to_string()) {
            anchor.set_html(LINK_CAPTION);
        } else {
            anchor.remove();
        }
    }

    serialize_fragment(&doc)
}

/// Rewrite the visible text of every hyperlink to the fixed caption.
///
/// Unlike [`remove_duplicate_links`] this never removes anchors; it is
/// reapplied unconditionally when an article is rendered.
#[must_use]
pub fn caption_links(fragment: &str) -> String {
    let doc = Document::from(fragment);

    for node in doc.select("a[href]").nodes() {
        Selection::from(node.clone()).set_html(LINK_CAPTION);
    }

    serialize_fragment(&doc)
}

/// Serialize the body of a parsed fragment back to fragment form.
fn serialize_fragment(doc: &Document) -> String {
    doc.select("body").inner_html().to_string()
}
