//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub REST API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Pull request not found
    #[error("Pull request #{0} not found")]
    PrNotFound(u64),

    /// No open pull request for a branch
    #[error("No open pull request found for branch '{0}'")]
    NoPrForBranch(String),

    /// GraphQL returned errors or no data
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
