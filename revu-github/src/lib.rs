//! Revu GitHub - GitHub integration for revu
//!
//! This crate fetches pull request review threads over GraphQL, resolves
//! threads, locates the pull request for a branch, discovers pull requests a
//! user has interacted with, and submits reviews.

mod client;
mod discover;
mod error;
mod graphql;
mod pr;
mod review;
mod threads;

pub use client::{parse_github_url, parse_pr_ref, GitHubClient, PrRef};
pub use discover::{merge_interactions, Interaction, PrSummary};
pub use error::{Error, Result};
pub use review::ReviewAction;
