//! Discovery of pull requests a user has interacted with

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{GitHubClient, Result};

/// How a user has engaged with a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    /// Reviewed, or asked to review
    Reviewer,
    /// Left a comment
    Commenter,
    /// Both of the above
    Both,
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Interaction::Reviewer => "reviewer",
            Interaction::Commenter => "commenter",
            Interaction::Both => "both",
        })
    }
}

/// An open pull request surfaced by discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Login of the PR author
    pub author: String,
    /// Web URL of the PR
    pub url: String,
    /// How the user engaged with it
    pub interaction: Interaction,
}

/// Search qualifiers and the interaction each one implies
const SEARCHES: [(&str, Interaction); 3] = [
    ("reviewed-by", Interaction::Reviewer),
    ("commenter", Interaction::Commenter),
    ("review-requested", Interaction::Reviewer),
];

/// Merge per-search results into one list.
///
/// A PR found through searches implying different interactions becomes
/// [`Interaction::Both`]. PRs authored by `username` are dropped. The result is
/// sorted by PR number.
pub fn merge_interactions(
    results: impl IntoIterator<Item = PrSummary>,
    username: &str,
) -> Vec<PrSummary> {
    let mut seen: BTreeMap<u64, PrSummary> = BTreeMap::new();

    for pr in results {
        match seen.get_mut(&pr.number) {
            Some(existing) if existing.interaction != pr.interaction => {
                existing.interaction = Interaction::Both;
            }
            Some(_) => {}
            None => {
                seen.insert(pr.number, pr);
            }
        }
    }

    seen.into_values()
        .filter(|pr| pr.author != username)
        .collect()
}

impl GitHubClient {
    /// Login of the authenticated user
    pub async fn current_user(&self) -> Result<String> {
        Ok(self.client().current().user().await?.login)
    }

    /// Open PRs in this repository that `username` reviewed, commented on, or
    /// was asked to review, excluding their own
    pub async fn find_user_prs(&self, username: &str) -> Result<Vec<PrSummary>> {
        let mut results = Vec::new();

        for (qualifier, interaction) in SEARCHES {
            let query = format!(
                "repo:{} is:pr is:open {}:{}",
                self.full_name(),
                qualifier,
                username
            );
            debug!(query = %query, "Searching pull requests");

            let page = self
                .client()
                .search()
                .issues_and_pull_requests(&query)
                .per_page(100)
                .send()
                .await?;

            results.extend(page.items.into_iter().map(|issue| PrSummary {
                number: issue.number,
                title: issue.title,
                author: issue.user.login,
                url: issue.html_url.to_string(),
                interaction,
            }));
        }

        Ok(merge_interactions(results, username))
    }
}
