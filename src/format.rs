//! Summary formatting: an ordered table of named rewrite steps.
//!
//! The rewrites are text-level and order-sensitive: later steps assume the
//! output shape of earlier ones (list reconstruction consumes the `<br>`
//! markers the newline step emits, the anchor pass expects the attribute
//! layout the image pass produces). The order contract is therefore explicit:
//! [`REWRITE_STEPS`] is the single source of truth, and each step is an
//! independently testable function.
//!
//! Heading flattening and style stripping run here again even though the
//! normalizer already did both, because this stage also runs on content that
//! bypassed normalization (the `"Content not available."` sentinel path and
//! re-rendered placeholder summaries).

use tracing::warn;

use crate::config::SiteConfig;
use crate::error::Result;
use crate::normalize::PARAGRAPH_CLASS;
use crate::patterns::{
    BARE_ANCHOR, BULLET_AFTER_BREAK, BULLET_AT_START, HEADING_CLOSE, HEADING_OPEN, IMAGE_TAG,
    INLINE_STYLE, ITEM_AT_END, ITEM_BREAK, MULTI_WHITESPACE, NEWLINE_RUN, ORDERED_ITEM_AT_END,
    ORDERED_ITEM_BREAK, ORDERED_ITEM_LEAD,
};

/// Inline notice appended when a rewrite step fails mid-chain.
pub const FORMAT_ERROR_NOTICE: &str =
    "<br><em>Formatting error occurred. Displaying raw content.</em>";

/// Caption given to image links by [`images_to_links`].
pub const IMAGE_CAPTION: &str = "Click to see image";

/// One named rewrite step.
pub struct RewriteStep {
    /// Stable step name, used in logs and error values.
    pub name: &'static str,
    apply: fn(&str, &SiteConfig) -> Result<String>,
}

impl RewriteStep {
    /// Apply this step to a summary string.
    pub fn apply(&self, summary: &str, config: &SiteConfig) -> Result<String> {
        (self.apply)(summary, config)
    }
}

/// The fixed, order-sensitive rewrite sequence.
pub const REWRITE_STEPS: &[RewriteStep] = &[
    RewriteStep { name: "collapse_whitespace", apply: collapse_whitespace },
    RewriteStep { name: "flatten_headings", apply: flatten_headings },
    RewriteStep { name: "strip_inline_styles", apply: strip_inline_styles },
    RewriteStep { name: "absolutize_root_sources", apply: absolutize_root_sources },
    RewriteStep { name: "newlines_to_breaks", apply: newlines_to_breaks },
    RewriteStep { name: "rebuild_ordered_lists", apply: rebuild_ordered_lists },
    RewriteStep { name: "rebuild_unordered_lists", apply: rebuild_unordered_lists },
    RewriteStep { name: "images_to_links", apply: images_to_links },
    RewriteStep { name: "normalize_anchor_targets", apply: normalize_anchor_targets },
];

/// Apply the full rewrite sequence to a summary string.
///
/// A failing step does not abort the pipeline: the best-effort string
/// produced so far is returned with [`FORMAT_ERROR_NOTICE`] appended.
#[must_use]
pub fn format_summary(summary: &str, config: &SiteConfig) -> String {
    apply_steps(summary, config, REWRITE_STEPS)
}

fn apply_steps(summary: &str, config: &SiteConfig, steps: &[RewriteStep]) -> String {
    let mut out = summary.to_string();
    for step in steps {
        match step.apply(&out, config) {
            Ok(next) => out = next,
            Err(e) => {
                warn!(step = step.name, error = %e, "summary rewrite failed; returning best-effort output");
                out.push_str(FORMAT_ERROR_NOTICE);
                return out;
            }
        }
    }
    out
}

/// Step 1: collapse newline-containing whitespace runs, then any remaining
/// run of two or more whitespace characters, to a single space.
pub fn collapse_whitespace(summary: &str, _config: &SiteConfig) -> Result<String> {
    let summary = NEWLINE_RUN.replace_all(summary, " ");
    Ok(MULTI_WHITESPACE.replace_all(&summary, " ").into_owned())
}

/// Step 2: flatten any heading tag, levels 1-6, to the normalized paragraph.
pub fn flatten_headings(summary: &str, _config: &SiteConfig) -> Result<String> {
    let open = format!(r#"<p class="{PARAGRAPH_CLASS}">"#);
    let summary = HEADING_OPEN.replace_all(summary, open.as_str());
    Ok(HEADING_CLOSE.replace_all(&summary, "</p>").into_owned())
}

/// Step 3: strip every inline `style="..."` attribute occurrence.
pub fn strip_inline_styles(summary: &str, _config: &SiteConfig) -> Result<String> {
    Ok(INLINE_STYLE.replace_all(summary, "").into_owned())
}

/// Step 4: rewrite root-relative `src` paths to absolute portal URLs.
pub fn absolutize_root_sources(summary: &str, config: &SiteConfig) -> Result<String> {
    Ok(summary.replace(r#"src="/"#, &format!(r#"src="{}/"#, config.portal_base)))
}

/// Step 5: replace literal newlines with line-break tags.
pub fn newlines_to_breaks(summary: &str, _config: &SiteConfig) -> Result<String> {
    Ok(summary.replace('\n', "<br>"))
}

/// Step 6: reconstruct ordered lists from `N. ` lead-ins, retaining the
/// numeral text, consuming the terminating line break, and closing a
/// trailing item at end of string.
pub fn rebuild_ordered_lists(summary: &str, _config: &SiteConfig) -> Result<String> {
    let summary = ORDERED_ITEM_LEAD.replace_all(summary, "<li>$1. ");
    let summary = ORDERED_ITEM_BREAK.replace_all(&summary, "$1</li>");
    Ok(ORDERED_ITEM_AT_END.replace_all(&summary, "$1</li>").into_owned())
}

/// Step 7: reconstruct unordered lists from `* ` lead-ins, closing items at
/// line breaks and closing the list at end of string.
pub fn rebuild_unordered_lists(summary: &str, _config: &SiteConfig) -> Result<String> {
    let summary = BULLET_AT_START.replace_all(summary, "<ul><li>");
    let summary = BULLET_AFTER_BREAK.replace_all(&summary, "</li><li>");
    let summary = ITEM_BREAK.replace_all(&summary, "$1</li>");
    Ok(ITEM_AT_END.replace_all(&summary, "$1</li></ul>").into_owned())
}

/// Step 8: convert every image tag into a clickable link, preserving the
/// original `src` as the link target.
pub fn images_to_links(summary: &str, _config: &SiteConfig) -> Result<String> {
    let replacement = format!(r#"<a href="$1" target="_blank">{IMAGE_CAPTION}</a>"#);
    Ok(IMAGE_TAG.replace_all(summary, replacement.as_str()).into_owned())
}

/// Step 9: give anchors without an explicit target a `target="_blank"`.
pub fn normalize_anchor_targets(summary: &str, _config: &SiteConfig) -> Result<String> {
    Ok(BARE_ANCHOR
        .replace_all(summary, r#"<a href="$1" target="_blank">$2</a>"#)
        .into_owned())
}
