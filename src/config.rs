//! Runtime configuration for the sync pipeline.
//!
//! The original automation kept its endpoints, markers, and credentials as
//! module-level constants and ambient environment state. Here everything is
//! an explicit `SiteConfig` value passed into the pipeline entry points, so
//! tests and alternate deployments can substitute their own portal and
//! repository without touching globals.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Configuration for one sync run.
///
/// All fields are public for easy construction. `Default::default()` matches
/// the production TeamUnify deployment.
///
/// # Example
///
/// ```rust
/// use portal_news_sync::SiteConfig;
///
/// let config = SiteConfig {
///     news_url: "https://portal.example.com/team/page/news".into(),
///     ..SiteConfig::default()
/// };
/// assert_eq!(config.news_file, "news.html");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host used to absolutize root-relative portal paths.
    ///
    /// No trailing slash.
    pub portal_base: String,

    /// URL of the portal's news listing page.
    pub news_url: String,

    /// URL of the repository holding the target document.
    pub repo_url: String,

    /// Directory name of the local checkout.
    pub repo_name: String,

    /// Path of the tracked target document, relative to the checkout root.
    pub news_file: String,

    /// Literal start marker of the managed region.
    pub start_marker: String,

    /// Literal end marker of the managed region.
    pub end_marker: String,

    /// Commit message used when pushing an updated document.
    pub commit_message: String,

    /// Per-request timeout for portal fetches, in seconds.
    pub request_timeout_secs: u64,

    /// Authentication token for repository pushes.
    ///
    /// Read from the `PAT_TOKEN` environment variable by the binary; never
    /// serialized from config files.
    #[serde(skip)]
    pub auth_token: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            portal_base: "http://www.gomotionapp.com".to_string(),
            news_url: "https://www.gomotionapp.com/team/cadas/page/news".to_string(),
            repo_url: "https://github.com/dareaquatics/dare-website".to_string(),
            repo_name: "dare-website".to_string(),
            news_file: "news.html".to_string(),
            start_marker: "<!-- START UNDER HERE -->".to_string(),
            end_marker: "<!-- END AUTOMATION SCRIPT -->".to_string(),
            commit_message: "automated commit: sync TeamUnify news articles [skip ci]"
                .to_string(),
            request_timeout_secs: 30,
            auth_token: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration overrides from a JSON file.
    ///
    /// Fields absent from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured endpoint parses as an absolute URL.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("portal_base", &self.portal_base),
            ("news_url", &self.news_url),
            ("repo_url", &self.repo_url),
        ] {
            Url::parse(value).map_err(|e| Error::Config(format!("{field} {value:?}: {e}")))?;
        }
        Ok(())
    }

    /// Absolutize a portal path against `portal_base`.
    ///
    /// Paths that already carry a scheme are returned unchanged.
    #[must_use]
    pub fn absolutize(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.portal_base, path)
        }
    }
}
