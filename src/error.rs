//! Error types for the sync pipeline.
//!
//! Per-article failures never appear here: they are converted into
//! error-placeholder records at the item boundary (see `article`). Only
//! whole-batch precondition failures and collaborator failures travel
//! as `Err` values.

/// Error type for pipeline and orchestration operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport failure while talking to the portal.
    #[error("portal request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading or writing a file failed.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A managed-region marker is missing from the target document.
    #[error("marker {0:?} not found in target document")]
    MarkerNotFound(String),

    /// The portal walk produced no articles; nothing to merge.
    #[error("no articles fetched from the portal")]
    EmptyFeed,

    /// A repository sync operation (clone/fetch/commit/push) failed.
    #[error("git operation failed: {0}")]
    Git(String),

    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A summary rewrite step could not be applied.
    #[error("rewrite step `{step}` failed: {reason}")]
    Rewrite {
        /// Name of the failed step, as listed in `format::REWRITE_STEPS`.
        step: &'static str,
        /// Human-readable failure description.
        reason: String,
    },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
