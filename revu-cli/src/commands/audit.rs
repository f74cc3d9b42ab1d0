//! Audit command - classify review threads on a pull request

use anyhow::Context;
use clap::Args;
use revu_core::audit::report::{render_json, render_markdown};
use revu_core::{auto_resolve, classify, Config, GitRepo, ReportFormat, ReviewThread};
use revu_github::{parse_pr_ref, GitHubClient};

use super::resolve_repo;

/// Audit review threads on a pull request
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// PR number or URL (default: PR for the current branch)
    #[arg(long)]
    pub pr: Option<String>,

    /// owner/repo (default: from the git remote)
    #[arg(long)]
    pub repo: Option<String>,

    /// Resolve threads confirmed addressed
    #[arg(long)]
    pub auto_resolve: bool,

    /// Output JSON instead of markdown
    #[arg(long)]
    pub json: bool,

    /// Only show threads that are not resolved
    #[arg(long)]
    pub exclude_resolved: bool,
}

impl AuditArgs {
    /// Execute the audit command
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let config = config.with_cli_overrides(self.json, self.exclude_resolved, self.auto_resolve);

        let git = GitRepo::open(".").context("revu audit must run inside the PR's checkout")?;

        let pr_ref = self.pr.as_deref().map(parse_pr_ref).transpose()?;
        let (owner, repo) = match pr_ref.as_ref().and_then(|p| p.repo.clone()) {
            Some(repo) => repo,
            None => resolve_repo(self.repo.as_deref())?,
        };

        let client = GitHubClient::new(&owner, &repo, &config.github)?;

        let pr_number = match pr_ref {
            Some(pr) => pr.number,
            None => {
                let branch = git
                    .current_branch()?
                    .context("could not detect current branch; pass --pr")?;
                client.find_pr_for_branch(&branch).await?
            }
        };

        eprintln!("Auditing {}/{}#{}...", owner, repo, pr_number);

        let mut threads = client.fetch_review_threads(pr_number).await?;
        classify(&git, &mut threads);

        if config.audit.auto_resolve {
            let summary = auto_resolve(&client, &mut threads).await;
            for id in &summary.resolved {
                if let Some(thread) = find_thread(&threads, id) {
                    eprintln!("  Resolved: {}", thread.location());
                }
            }
            for failure in &summary.failures {
                let location = find_thread(&threads, &failure.thread_id)
                    .map(|t| t.location())
                    .unwrap_or_else(|| failure.thread_id.clone());
                eprintln!("  Failed to resolve {}: {}", location, failure.reason);
            }
        }

        let report = match config.audit.format {
            ReportFormat::Json => render_json(&threads)?,
            ReportFormat::Markdown => render_markdown(&threads, config.audit.exclude_resolved),
        };
        println!("{}", report);

        Ok(())
    }
}

fn find_thread<'a>(threads: &'a [ReviewThread], id: &str) -> Option<&'a ReviewThread> {
    threads.iter().find(|t| t.thread_id == id)
}
