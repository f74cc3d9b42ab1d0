//! Submitting pull request reviews

use serde_json::json;
use tracing::info;

use crate::{Error, GitHubClient, Result};

/// Review verdict to submit on a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    RequestChanges,
    Comment,
}

impl ReviewAction {
    /// Event name expected by the reviews API
    pub fn event(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "APPROVE",
            ReviewAction::RequestChanges => "REQUEST_CHANGES",
            ReviewAction::Comment => "COMMENT",
        }
    }

    /// Past-tense phrase for confirmation messages
    pub fn past_tense(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approved",
            ReviewAction::RequestChanges => "requested changes on",
            ReviewAction::Comment => "commented on",
        }
    }

    /// GitHub rejects these reviews without a body
    pub fn requires_body(&self) -> bool {
        !matches!(self, ReviewAction::Approve)
    }
}

impl GitHubClient {
    /// Submit a review on a pull request
    pub async fn submit_review(
        &self,
        pr_number: u64,
        action: ReviewAction,
        body: Option<&str>,
    ) -> Result<()> {
        let body = body.map(str::trim).filter(|b| !b.is_empty());
        if action.requires_body() && body.is_none() {
            return Err(Error::InvalidInput(format!(
                "{} requires a review body",
                action.event()
            )));
        }

        let mut payload = json!({ "event": action.event() });
        if let Some(body) = body {
            payload["body"] = json!(body);
        }

        let route = format!(
            "/repos/{}/{}/pulls/{}/reviews",
            self.owner(),
            self.repo(),
            pr_number
        );
        let _: serde_json::Value = self
            .client()
            .post(route, Some(&payload))
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. } if source.message.contains("Not Found") => {
                    Error::PrNotFound(pr_number)
                }
                _ => Error::Api(e),
            })?;

        info!(pr_number, event = action.event(), "Submitted review");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_and_phrases() {
        assert_eq!(ReviewAction::RequestChanges.event(), "REQUEST_CHANGES");
        assert_eq!(ReviewAction::Comment.past_tense(), "commented on");
        assert!(!ReviewAction::Approve.requires_body());
        assert!(ReviewAction::Comment.requires_body());
    }
}
