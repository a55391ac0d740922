//! The `Article` value record and its sentinel vocabulary.
//!
//! Every field of an `Article` is always populated: extraction gaps are
//! filled with fixed sentinel strings, and a failed fetch produces the
//! uniform error placeholder. Downstream stages never see a partially
//! filled record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel title for articles without a heading.
pub const NO_TITLE: &str = "No Title";

/// Sentinel date for articles without a parseable timestamp.
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Sentinel author for articles without an author byline.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Sentinel summary for articles without a content container.
pub const CONTENT_UNAVAILABLE: &str = "Content not available.";

/// Placeholder title for articles whose fetch failed outright.
pub const ERROR_TITLE: &str = "Error fetching title";

/// Placeholder summary for articles whose fetch failed outright.
pub const ERROR_CONTENT: &str = "Error fetching content.";

/// Fixed caption applied to every surviving hyperlink.
pub const LINK_CAPTION: &str = "Click here to be redirected to the link";

/// Human-readable date format used throughout the pipeline (`Month Day, Year`).
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// One news article, extracted from a portal page.
///
/// `summary` starts as the normalized content fragment and is rewritten in
/// place by the formatting stages; the final value is self-contained
/// embeddable HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline, or [`NO_TITLE`].
    pub title: String,
    /// Publication date formatted per [`DATE_FORMAT`], or [`UNKNOWN_DATE`].
    pub date: String,
    /// Author name, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// HTML content fragment.
    pub summary: String,
}

impl Article {
    /// The uniform record produced when an article fetch or parse fails.
    #[must_use]
    pub fn error_placeholder() -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            date: UNKNOWN_DATE.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            summary: ERROR_CONTENT.to_string(),
        }
    }

    /// Parse the formatted date back into a calendar date.
    ///
    /// Returns `None` for the [`UNKNOWN_DATE`] sentinel or any string that
    /// does not match [`DATE_FORMAT`]; such articles sort last.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// Per-article outcome of the fetch-and-parse step.
///
/// Placeholders are a normal, expected result, not an exceptional one, so
/// they travel as values rather than errors. Both variants carry a fully
/// populated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleOutcome {
    /// The page was fetched and parsed; fields may still hold soft sentinels.
    Parsed(Article),
    /// The fetch failed; the uniform error placeholder stands in.
    Placeholder(Article),
}

impl ArticleOutcome {
    /// Unwrap into the article record, whichever variant this is.
    #[must_use]
    pub fn into_article(self) -> Article {
        match self {
            Self::Parsed(article) | Self::Placeholder(article) => article,
        }
    }

    /// Whether this outcome is the error placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}
