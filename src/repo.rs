//! Repository sync collaborator.
//!
//! The pipeline itself only depends on "read current bytes, later write new
//! bytes"; this module wraps the surrounding version-control choreography:
//! ensure a fresh local checkout, and commit-and-push the tracked file when
//! the working tree is dirty. Operations shell out to the system `git`
//! binary; stderr from a failed invocation is surfaced in the error value.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// Handle to the tracked repository checkout.
pub struct RepoSync {
    repo_url: String,
    checkout: PathBuf,
    auth_token: Option<String>,
}

impl RepoSync {
    /// Describe the checkout at `workdir/<repo_name>`.
    #[must_use]
    pub fn new(config: &SiteConfig, workdir: &Path) -> Self {
        Self {
            repo_url: config.repo_url.clone(),
            checkout: workdir.join(&config.repo_name),
            auth_token: config.auth_token.clone(),
        }
    }

    /// Path of the local checkout directory.
    #[must_use]
    pub fn checkout_path(&self) -> &Path {
        &self.checkout
    }

    /// Ensure a local checkout exists and matches the remote head.
    ///
    /// Clones when absent; when present but behind (or diverged from) the
    /// remote, the checkout is deleted and re-cloned rather than merged.
    pub fn ensure_checkout(&self) -> Result<()> {
        if !self.checkout.exists() {
            return self.clone_fresh();
        }
        if self.is_up_to_date()? {
            info!(path = %self.checkout.display(), "local checkout is up to date");
            return Ok(());
        }
        info!(path = %self.checkout.display(), "checkout is stale; re-cloning");
        std::fs::remove_dir_all(&self.checkout)?;
        self.clone_fresh()
    }

    /// Stage the tracked file and push a commit when the tree is dirty.
    ///
    /// Returns `false` (and performs no commit) when there is nothing to
    /// commit.
    pub fn commit_and_push(&self, file: &str, message: &str) -> Result<bool> {
        let status = self.run_git(&["status", "--porcelain", "--", file])?;
        if status.trim().is_empty() {
            info!("no changes to commit");
            return Ok(false);
        }

        self.run_git(&["add", "--", file])?;
        self.run_git(&["commit", "-m", message])?;
        let push_url = self.authenticated_url();
        self.run_git(&["push", &push_url, "HEAD"])?;
        info!(file, "pushed updated document");
        Ok(true)
    }

    fn clone_fresh(&self) -> Result<()> {
        info!(url = %self.repo_url, path = %self.checkout.display(), "cloning repository");
        let clone_url = self.authenticated_url();
        let output = Command::new("git")
            .args(["clone", "--depth", "1", &clone_url])
            .arg(&self.checkout)
            .output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::Git(String::from_utf8_lossy(&output.stderr).into_owned()))
        }
    }

    /// Compare the local head against the remote default branch head.
    fn is_up_to_date(&self) -> Result<bool> {
        self.run_git(&["fetch", "origin"])?;
        let local = self.run_git(&["rev-parse", "HEAD"])?;
        let remote = self.run_git(&["rev-parse", "origin/HEAD"]).or_else(|_| {
            // Repositories without a remote HEAD ref fall back to main.
            self.run_git(&["rev-parse", "origin/main"])
        })?;
        Ok(local.trim() == remote.trim())
    }

    /// Embed the auth token into the repository URL, when configured.
    fn authenticated_url(&self) -> String {
        match &self.auth_token {
            Some(token) => self
                .repo_url
                .replacen("https://", &format!("https://{token}@"), 1),
            None => self.repo_url.clone(),
        }
    }

    /// Run one git command inside the checkout, capturing stdout.
    fn run_git(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.checkout)
            .output()?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::Git(format!(
                "git {}: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}
