//! GitHub API client using octocrab for REST and reqwest for GraphQL

use crate::{Error, Result};
use octocrab::Octocrab;
use revu_core::{GitHubConfig, Secrets};
use tracing::info;

/// GitHub API client bound to one repository
pub struct GitHubClient {
    client: Octocrab,
    http: reqwest::Client,
    token: String,
    config: GitHubConfig,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN or GH_TOKEN environment variable
    /// 2. ~/.config/revu/secrets.toml
    /// 3. `gh auth token`
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        config: &GitHubConfig,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN, add a token to \
                 ~/.config/revu/secrets.toml, or run 'gh auth login'"
                    .to_string(),
            )
        })?;

        let client = Octocrab::builder()
            .personal_token(token.clone())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("revu/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(owner = %owner, repo = %repo, "Created GitHub client");

        Ok(Self {
            client,
            http,
            token,
            config: config.clone(),
            owner,
            repo,
        })
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn config(&self) -> &GitHubConfig {
        &self.config
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Parse a GitHub URL into owner and repo
///
/// Supports formats:
/// - owner/repo
/// - https://github.com/owner/repo
/// - git@github.com:owner/repo.git
pub fn parse_github_url(url: &str) -> Result<(String, String)> {
    let url = url.trim();

    if !url.contains(':') && !url.contains('/') {
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            url
        )));
    }

    if !url.contains("://") && !url.contains('@') {
        // Simple owner/repo format
        let parts: Vec<&str> = url.split('/').collect();
        if parts.len() == 2 && parts.iter().all(|p| !p.is_empty()) {
            return Ok((
                parts[0].to_string(),
                parts[1].trim_end_matches(".git").to_string(),
            ));
        }
        return Err(Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            url
        )));
    }

    if url.starts_with("https://") || url.starts_with("http://") {
        let url = url::Url::parse(url).map_err(|e| Error::Parse(e.to_string()))?;
        let path = url.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
        return Err(Error::Parse(format!("Invalid GitHub URL path: {}", path)));
    }

    if url.starts_with("git@") {
        if let Some(path) = url.split(':').nth(1) {
            let path = path.trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() >= 2 {
                return Ok((parts[0].to_string(), parts[1].to_string()));
            }
        }
        return Err(Error::Parse(format!("Invalid SSH URL: {}", url)));
    }

    Err(Error::Parse(format!("Unrecognized URL format: {}", url)))
}

/// A pull request given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRef {
    /// Repository named by a PR URL, overriding the detected one
    pub repo: Option<(String, String)>,
    /// Pull request number
    pub number: u64,
}

/// Parse a PR number or a `https://github.com/owner/repo/pull/N` URL
pub fn parse_pr_ref(arg: &str) -> Result<PrRef> {
    let arg = arg.trim();

    if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        let number = arg
            .parse()
            .map_err(|_| Error::Parse(format!("PR number out of range: {}", arg)))?;
        return Ok(PrRef { repo: None, number });
    }

    let invalid = || Error::Parse(format!("Could not parse PR argument: {}", arg));

    let url = url::Url::parse(arg).map_err(|_| invalid())?;
    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
    match segments.as_slice() {
        [owner, repo, "pull", number, ..] if !owner.is_empty() && !repo.is_empty() => {
            let number = number.parse().map_err(|_| invalid())?;
            Ok(PrRef {
                repo: Some((owner.to_string(), repo.to_string())),
                number,
            })
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        let (owner, repo) = parse_github_url("owner/repo").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_https_url_with_git_suffix() {
        let (owner, repo) = parse_github_url("https://github.com/owner/repo.git").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_ssh_url() {
        let (owner, repo) = parse_github_url("git@github.com:owner/repo.git\n").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_github_url("invalid").is_err());
        assert!(parse_github_url("owner/").is_err());
    }

    #[test]
    fn test_pr_ref_number() {
        assert_eq!(
            parse_pr_ref("123").unwrap(),
            PrRef {
                repo: None,
                number: 123
            }
        );
    }

    #[test]
    fn test_pr_ref_url() {
        let pr = parse_pr_ref("https://github.com/owner/repo/pull/42").unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.repo, Some(("owner".to_string(), "repo".to_string())));

        let pr = parse_pr_ref("https://github.com/owner/repo/pull/42/files").unwrap();
        assert_eq!(pr.number, 42);
    }

    #[test]
    fn test_pr_ref_invalid() {
        assert!(parse_pr_ref("not-a-pr").is_err());
        assert!(parse_pr_ref("https://github.com/owner/repo/issues/42").is_err());
        assert!(parse_pr_ref("").is_err());
    }
}
