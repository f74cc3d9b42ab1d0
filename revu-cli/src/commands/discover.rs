//! Discover command - list open PRs the current user has reviewed

use clap::Args;
use revu_core::audit::report::truncate;
use revu_core::Config;
use revu_github::{GitHubClient, PrSummary};

use super::resolve_repo;

/// Find open pull requests you have reviewed or commented on
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// owner/repo (default: from the git remote)
    #[arg(long)]
    pub repo: Option<String>,

    /// Output JSON instead of a markdown table
    #[arg(long)]
    pub json: bool,
}

impl DiscoverArgs {
    /// Execute the discover command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (owner, repo) = resolve_repo(self.repo.as_deref())?;
        let client = GitHubClient::new(&owner, &repo, &config.github)?;
        let username = client.current_user().await?;

        eprintln!("Scanning {} for @{}'s reviews...", client.full_name(), username);
        let prs = client.find_user_prs(&username).await?;

        if prs.is_empty() {
            println!(
                "No open PRs found where @{} has reviewed or commented.",
                username
            );
            return Ok(());
        }

        eprintln!("Found {} open PRs.", prs.len());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&prs)?);
        } else {
            println!("{}", render_table(&client.full_name(), &username, &prs));
        }

        Ok(())
    }
}

fn render_table(repo: &str, username: &str, prs: &[PrSummary]) -> String {
    let mut lines = vec![
        format!("# Open PRs reviewed by @{} in {}\n", username, repo),
        "| # | Title | Author | Role | URL |".to_string(),
        "|---|-------|--------|------|-----|".to_string(),
    ];
    for pr in prs {
        lines.push(format!(
            "| {} | {} | @{} | {} | [Link]({}) |",
            pr.number,
            truncate(&pr.title, 60),
            pr.author,
            pr.interaction,
            pr.url
        ));
    }
    lines.push(format!("\n**{}** open PRs total.", prs.len()));
    lines.join("\n")
}
