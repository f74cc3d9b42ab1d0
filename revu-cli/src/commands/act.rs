//! Act command - submit a review verdict on a pull request

use clap::{Args, ValueEnum};
use revu_core::Config;
use revu_github::{parse_pr_ref, GitHubClient, ReviewAction};

use super::resolve_repo;

/// Review verdict
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionArg {
    Approve,
    RequestChanges,
    Comment,
}

impl From<ActionArg> for ReviewAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Approve => ReviewAction::Approve,
            ActionArg::RequestChanges => ReviewAction::RequestChanges,
            ActionArg::Comment => ReviewAction::Comment,
        }
    }
}

/// Approve, request changes on, or comment on a pull request
#[derive(Args, Debug)]
pub struct ActArgs {
    /// PR number or URL
    #[arg(long)]
    pub pr: String,

    /// Review verdict
    #[arg(long, value_enum)]
    pub action: ActionArg,

    /// Review comment body
    #[arg(long)]
    pub body: Option<String>,

    /// owner/repo (default: from the git remote)
    #[arg(long)]
    pub repo: Option<String>,

    /// Preview the action without submitting it
    #[arg(long)]
    pub draft: bool,
}

impl ActArgs {
    /// Execute the act command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pr_ref = parse_pr_ref(&self.pr)?;
        let (owner, repo) = match pr_ref.repo {
            Some(repo) => repo,
            None => resolve_repo(self.repo.as_deref())?,
        };
        let full_name = format!("{}/{}", owner, repo);
        let action = ReviewAction::from(self.action);

        if self.draft {
            println!(
                "{}",
                format_action_draft(&full_name, pr_ref.number, action, self.body.as_deref())
            );
            return Ok(());
        }

        let client = GitHubClient::new(&owner, &repo, &config.github)?;
        client
            .submit_review(pr_ref.number, action, self.body.as_deref())
            .await?;

        println!(
            "Successfully {} {}#{}",
            action.past_tense(),
            full_name,
            pr_ref.number
        );
        Ok(())
    }
}

fn format_action_draft(repo: &str, pr_number: u64, action: ReviewAction, body: Option<&str>) -> String {
    let mut lines = vec![
        "# Action Draft\n".to_string(),
        format!("**Repository:** {}", repo),
        format!("**PR:** #{}", pr_number),
        format!("**Action:** {}", action.event()),
    ];
    match body {
        Some(body) if !body.trim().is_empty() => lines.push(format!("\n**Body:**\n> {}", body)),
        _ => lines.push("\n**Body:** _(empty - will submit without comment)_".to_string()),
    }
    lines.push("\n---".to_string());
    lines.push("To execute, run the same command without `--draft`.".to_string());
    lines.join("\n")
}
