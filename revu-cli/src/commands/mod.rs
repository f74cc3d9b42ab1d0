//! CLI command implementations

pub mod act;
pub mod audit;
pub mod discover;

pub use act::ActArgs;
pub use audit::AuditArgs;
pub use discover::DiscoverArgs;

use anyhow::Context;
use revu_core::GitRepo;
use revu_github::parse_github_url;

/// Resolve `owner/repo` from `--repo` or the checkout's default remote
pub(crate) fn resolve_repo(repo: Option<&str>) -> anyhow::Result<(String, String)> {
    if let Some(repo) = repo {
        return Ok(parse_github_url(repo)?);
    }

    let git = GitRepo::open(".").context("could not detect repository; pass --repo owner/repo")?;
    let remote = git.default_remote()?;
    parse_github_url(&remote.url)
        .with_context(|| format!("could not parse remote URL: {}", remote.url))
}
