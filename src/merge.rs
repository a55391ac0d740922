//! Managed-region replacement inside the target document.
//!
//! The target document carries two literal marker comments. Everything up to
//! and including the start marker and everything from the end marker onward
//! is preserved byte-for-byte; the region between them is fully replaced on
//! every run. Anchoring on the literal markers (not positions or checksums)
//! makes the merge idempotent by construction.

use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// Replace the managed region of `document` with `fragment`.
///
/// Fails without producing output if either marker is absent.
pub fn merge_managed_region(
    document: &str,
    fragment: &str,
    config: &SiteConfig,
) -> Result<String> {
    let start = document
        .find(&config.start_marker)
        .ok_or_else(|| Error::MarkerNotFound(config.start_marker.clone()))?;
    let end = document
        .find(&config.end_marker)
        .ok_or_else(|| Error::MarkerNotFound(config.end_marker.clone()))?;

    let prefix_end = start + config.start_marker.len();
    Ok(format!(
        "{}\n{}\n{}",
        &document[..prefix_end],
        fragment,
        &document[end..]
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DOC: &str =
        "<html>A<!-- START UNDER HERE -->OLD<!-- END AUTOMATION SCRIPT -->B</html>";

    #[test]
    fn replaces_only_the_managed_region() {
        let out = merge_managed_region(DOC, "NEW", &SiteConfig::default()).unwrap();
        assert_eq!(
            out,
            "<html>A<!-- START UNDER HERE -->\nNEW\n<!-- END AUTOMATION SCRIPT -->B</html>"
        );
    }

    #[test]
    fn merge_is_idempotent_for_the_same_fragment() {
        let config = SiteConfig::default();
        let once = merge_managed_region(DOC, "NEW", &config).unwrap();
        let twice = merge_managed_region(&once, "NEW", &config).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rerun_with_different_fragment_replaces_without_drift() {
        let config = SiteConfig::default();
        let first = merge_managed_region(DOC, "FIRST", &config).unwrap();
        let second = merge_managed_region(&first, "SECOND", &config).unwrap();
        assert!(!second.contains("FIRST"));
        assert!(second.contains("\nSECOND\n"));
    }

    #[test]
    fn missing_start_marker_is_an_error() {
        let doc = "<html><!-- END AUTOMATION SCRIPT --></html>";
        let err = merge_managed_region(doc, "NEW", &SiteConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MarkerNotFound(m) if m.contains("START")));
    }

    #[test]
    fn missing_end_marker_is_an_error() {
        let doc = "<html><!-- START UNDER HERE --></html>";
        let err = merge_managed_region(doc, "NEW", &SiteConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MarkerNotFound(m) if m.contains("END")));
    }
}
