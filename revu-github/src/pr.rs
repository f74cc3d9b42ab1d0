//! Pull request lookup

use crate::{Error, GitHubClient, Result};
use octocrab::params;
use tracing::debug;

/// Pick the PR whose head branch is named `branch`.
///
/// The head owner is ignored so PRs opened from forks still match. Candidates
/// arrive newest first and the first match wins.
fn select_pr_for_branch<'a>(
    candidates: impl IntoIterator<Item = (u64, &'a str)>,
    branch: &str,
) -> Option<u64> {
    candidates
        .into_iter()
        .find(|(_, head_ref)| *head_ref == branch)
        .map(|(number, _)| number)
}

impl GitHubClient {
    /// Find the open pull request whose head branch is `branch`
    pub async fn find_pr_for_branch(&self, branch: &str) -> Result<u64> {
        debug!(branch, "Looking up pull request for branch");

        let page = self
            .client()
            .pulls(self.owner(), self.repo())
            .list()
            .state(params::State::Open)
            .sort(params::pulls::Sort::Created)
            .direction(params::Direction::Descending)
            .per_page(100)
            .send()
            .await?;
        let prs = self.client().all_pages(page).await?;
        debug!(branch, open = prs.len(), "Listed open pull requests");

        select_pr_for_branch(
            prs.iter().map(|pr| (pr.number, pr.head.ref_field.as_str())),
            branch,
        )
        .ok_or_else(|| Error::NoPrForBranch(branch.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_matches_branch_name_only() {
        // fork PRs share the branch name but not the owner
        let open = [(12, "main-fix"), (11, "fix-x"), (9, "docs")];
        assert_eq!(select_pr_for_branch(open, "fix-x"), Some(11));
    }

    #[test]
    fn test_select_prefers_newest() {
        let open = [(20, "fix-x"), (14, "fix-x")];
        assert_eq!(select_pr_for_branch(open, "fix-x"), Some(20));
    }

    #[test]
    fn test_select_no_match() {
        let open = [(3, "feature/fix-x"), (2, "fix-x-2")];
        assert_eq!(select_pr_for_branch(open, "fix-x"), None);
        assert_eq!(select_pr_for_branch(std::iter::empty(), "fix-x"), None);
    }
}
