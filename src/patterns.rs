//! Compiled regex patterns for summary rewriting.
//!
//! All patterns are compiled once at first use via `LazyLock`. They are
//! grouped by the rewrite step that owns them; the step order contract
//! lives in `format::REWRITE_STEPS`, not here.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Whitespace Collapsing
// =============================================================================

/// Matches any whitespace run containing a newline.
pub static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("NEWLINE_RUN regex"));

/// Matches runs of two or more whitespace characters.
pub static MULTI_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("MULTI_WHITESPACE regex"));

// =============================================================================
// Heading Flattening
// =============================================================================

/// Matches any heading open tag, levels 1-6, with any attributes.
pub static HEADING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h[1-6][^>]*>").expect("HEADING_OPEN regex"));

/// Matches any heading close tag, levels 1-6.
pub static HEADING_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</h[1-6]>").expect("HEADING_CLOSE regex"));

// =============================================================================
// Attribute Stripping
// =============================================================================

/// Matches an inline `style="..."` attribute occurrence.
pub static INLINE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style="[^"]*""#).expect("INLINE_STYLE regex"));

// =============================================================================
// List Reconstruction
// =============================================================================

/// Matches a numbered-list lead-in such as `3. `.
pub static ORDERED_ITEM_LEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\. ").expect("ORDERED_ITEM_LEAD regex"));

/// Matches an opened numbered item terminated by a line break.
pub static ORDERED_ITEM_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<li>\d+\. [^<]+)<br>").expect("ORDERED_ITEM_BREAK regex"));

/// Matches an opened numbered item at end of string.
pub static ORDERED_ITEM_AT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<li>\d+\. [^<]+)$").expect("ORDERED_ITEM_AT_END regex"));

/// Matches a bullet lead-in at start of string.
pub static BULLET_AT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\* ").expect("BULLET_AT_START regex"));

/// Matches a bullet lead-in following a line break.
pub static BULLET_AFTER_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br>\* ").expect("BULLET_AFTER_BREAK regex"));

/// Matches an opened list item terminated by a line break.
pub static ITEM_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<li>[^<]+)<br>").expect("ITEM_BREAK regex"));

/// Matches an opened list item at end of string.
pub static ITEM_AT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<li>[^<]+)$").expect("ITEM_AT_END regex"));

// =============================================================================
// Link Normalization
// =============================================================================

/// Matches an image tag, capturing its `src` value.
pub static IMAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img src="([^"]+)"[^>]*>"#).expect("IMAGE_TAG regex"));

/// Matches an anchor without an explicit `target` attribute,
/// capturing its `href` and visible text.
pub static BARE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]+)">([^<]+)</a>"#).expect("BARE_ANCHOR regex")
});
