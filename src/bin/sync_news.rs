//! Sync the portal news feed into the tracked site document.
//!
//! Orchestration only: every interesting decision lives in the library.
//! Sequence: ensure checkout, read document, run pipeline, write document,
//! commit-and-push when dirty. Structural failures abort before any write.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use portal_news_sync::fetch::HttpFetcher;
use portal_news_sync::repo::RepoSync;
use portal_news_sync::{run_pipeline, Error, Result, SiteConfig};

/// sync-news - mirror portal news articles into the site's managed region
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file overriding the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to hold the repository checkout
    #[arg(short, long, default_value = ".")]
    workdir: PathBuf,

    /// Fetch and merge, but skip the commit-and-push step
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => {
            info!("update process completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "update process aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };
    config.validate()?;
    config.auth_token = std::env::var("PAT_TOKEN").ok();
    if config.auth_token.is_none() && !args.dry_run {
        return Err(Error::Config(
            "PAT_TOKEN environment variable not set".to_string(),
        ));
    }

    let repo = RepoSync::new(&config, &args.workdir);
    repo.ensure_checkout()?;

    let news_path = repo.checkout_path().join(&config.news_file);
    let document = std::fs::read_to_string(&news_path)?;

    let fetcher = HttpFetcher::new(&config)?;
    let updated = run_pipeline(&fetcher, &document, &config)?;

    std::fs::write(&news_path, updated)?;
    info!(path = %news_path.display(), "updated target document");

    if args.dry_run {
        info!("dry run: skipping commit and push");
        return Ok(());
    }

    repo.commit_and_push(&config.news_file, &config.commit_message)?;
    Ok(())
}
