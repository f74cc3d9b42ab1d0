//! Pull request review threads over GraphQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use revu_core::{ReviewThread, ThreadComment, ThreadResolver, ThreadStatus};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{Error, GitHubClient, Result};

const REVIEW_THREADS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $pr: Int!, $first: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $pr) {
      reviewThreads(first: $first, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          isResolved
          isOutdated
          line
          originalLine
          path
          resolvedBy { login }
          comments(first: 50) {
            nodes {
              body
              author { login }
              outdated
              diffHunk
              createdAt
              originalCommit { oid }
            }
          }
        }
      }
    }
  }
}
"#;

const RESOLVE_THREAD_MUTATION: &str = r#"
mutation($threadId: ID!) {
  resolveReviewThread(input: { threadId: $threadId }) {
    thread { id isResolved }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct ThreadsData {
    repository: Option<RepositoryData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryData {
    pull_request: Option<PullRequestData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestData {
    review_threads: ThreadConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadConnection {
    page_info: PageInfo,
    nodes: Vec<ThreadNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadNode {
    id: String,
    is_resolved: bool,
    is_outdated: bool,
    line: Option<u64>,
    original_line: Option<u64>,
    path: String,
    resolved_by: Option<Actor>,
    comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
struct CommentConnection {
    nodes: Vec<CommentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    body: String,
    author: Option<Actor>,
    #[serde(default)]
    outdated: bool,
    #[serde(default)]
    diff_hunk: Option<String>,
    created_at: DateTime<Utc>,
    original_commit: Option<CommitRef>,
}

#[derive(Debug, Deserialize)]
struct Actor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    oid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveData {
    resolve_review_thread: Option<ResolvePayload>,
}

#[derive(Debug, Deserialize)]
struct ResolvePayload {
    thread: Option<ResolvedThread>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedThread {
    is_resolved: bool,
}

impl From<ThreadNode> for ReviewThread {
    fn from(node: ThreadNode) -> Self {
        // GitHub exposes the diff context on comments, not threads
        let diff_hunk = node
            .comments
            .nodes
            .first()
            .and_then(|c| c.diff_hunk.clone())
            .unwrap_or_default();

        let comments = node
            .comments
            .nodes
            .into_iter()
            .map(|c| ThreadComment {
                author: c
                    .author
                    .map(|a| a.login)
                    .unwrap_or_else(|| "unknown".to_string()),
                body: c.body,
                created_at: c.created_at,
                outdated: c.outdated,
                original_commit_oid: c.original_commit.map(|o| o.oid),
            })
            .collect();

        ReviewThread {
            thread_id: node.id,
            path: node.path,
            line: node.line,
            original_line: node.original_line,
            is_resolved: node.is_resolved,
            is_outdated: node.is_outdated,
            resolved_by: node.resolved_by.map(|a| a.login),
            diff_hunk,
            comments,
            status: ThreadStatus::default(),
            diff_evidence: None,
        }
    }
}

/// Append one page of threads, returning the cursor of the next page if any
fn take_page(
    threads: &mut Vec<ReviewThread>,
    data: ThreadsData,
    pr_number: u64,
) -> Result<Option<String>> {
    let connection = data
        .repository
        .and_then(|r| r.pull_request)
        .ok_or(Error::PrNotFound(pr_number))?
        .review_threads;

    threads.extend(connection.nodes.into_iter().map(ReviewThread::from));

    Ok(connection
        .page_info
        .end_cursor
        .filter(|_| connection.page_info.has_next_page))
}

impl GitHubClient {
    /// Fetch every review thread on a pull request, following pagination
    pub async fn fetch_review_threads(&self, pr_number: u64) -> Result<Vec<ReviewThread>> {
        let mut threads = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            debug!(pr_number, cursor = ?cursor, "Fetching review threads page");

            let variables = json!({
                "owner": self.owner(),
                "repo": self.repo(),
                "pr": pr_number,
                "first": self.config().page_size,
                "cursor": cursor,
            });

            let data: ThreadsData = self
                .graphql_query(REVIEW_THREADS_QUERY, &variables)
                .await?;

            match take_page(&mut threads, data, pr_number)? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!(pr_number, count = threads.len(), "Fetched review threads");
        Ok(threads)
    }

    /// Resolve a review thread, returning whether GitHub reports it resolved
    pub async fn resolve_review_thread(&self, thread_id: &str) -> Result<bool> {
        debug!(thread_id, "Resolving review thread");

        let data: ResolveData = self
            .graphql_query(RESOLVE_THREAD_MUTATION, &json!({ "threadId": thread_id }))
            .await?;

        Ok(data
            .resolve_review_thread
            .and_then(|p| p.thread)
            .map(|t| t.is_resolved)
            .unwrap_or(false))
    }
}

#[async_trait]
impl ThreadResolver for GitHubClient {
    async fn resolve(&self, thread_id: &str) -> revu_core::Result<bool> {
        self.resolve_review_thread(thread_id)
            .await
            .map_err(|e| revu_core::Error::Other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphQLResponse;

    const PAGE: &str = r#"{
      "repository": {
        "pullRequest": {
          "reviewThreads": {
            "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29y" },
            "nodes": [
              {
                "id": "PRRT_1",
                "isResolved": true,
                "isOutdated": false,
                "line": 12,
                "originalLine": 10,
                "path": "src/lib.rs",
                "resolvedBy": { "login": "alice" },
                "comments": {
                  "nodes": [
                    {
                      "body": "Use a constant here",
                      "author": { "login": "bob" },
                      "outdated": false,
                      "diffHunk": "@@ -8,3 +8,3 @@\n-let x = 1;",
                      "createdAt": "2024-05-01T10:00:00Z",
                      "originalCommit": { "oid": "abc123" }
                    },
                    {
                      "body": "Done",
                      "author": null,
                      "outdated": false,
                      "diffHunk": "@@ -1 +1 @@",
                      "createdAt": "2024-05-02T10:00:00Z",
                      "originalCommit": null
                    }
                  ]
                }
              },
              {
                "id": "PRRT_2",
                "isResolved": false,
                "isOutdated": true,
                "line": null,
                "originalLine": null,
                "path": "README.md",
                "resolvedBy": null,
                "comments": { "nodes": [] }
              }
            ]
          }
        }
      }
    }"#;

    #[test]
    fn test_parse_threads_page() {
        let data: ThreadsData = serde_json::from_str(PAGE).unwrap();
        let connection = data.repository.unwrap().pull_request.unwrap().review_threads;
        assert!(connection.page_info.has_next_page);
        assert_eq!(connection.page_info.end_cursor.as_deref(), Some("Y3Vyc29y"));

        let threads: Vec<ReviewThread> = connection.nodes.into_iter().map(Into::into).collect();
        assert_eq!(threads.len(), 2);

        let first = &threads[0];
        assert_eq!(first.thread_id, "PRRT_1");
        assert_eq!(first.original_line, Some(10));
        assert_eq!(first.resolved_by.as_deref(), Some("alice"));
        assert_eq!(first.diff_hunk, "@@ -8,3 +8,3 @@\n-let x = 1;");
        assert_eq!(first.original_commit(), Some("abc123"));
        assert_eq!(first.comments[1].author, "unknown");
        assert_eq!(first.status, ThreadStatus::Unresolved);

        let second = &threads[1];
        assert!(second.is_outdated);
        assert!(second.comments.is_empty());
        assert_eq!(second.diff_hunk, "");
        assert_eq!(second.original_commit(), None);
    }

    fn page(has_next: bool, cursor: Option<&str>, id: &str) -> ThreadsData {
        serde_json::from_value(json!({
            "repository": {
                "pullRequest": {
                    "reviewThreads": {
                        "pageInfo": { "hasNextPage": has_next, "endCursor": cursor },
                        "nodes": [{
                            "id": id,
                            "isResolved": false,
                            "isOutdated": false,
                            "line": 3,
                            "originalLine": 3,
                            "path": "src/main.rs",
                            "resolvedBy": null,
                            "comments": { "nodes": [] }
                        }]
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_take_page_follows_cursor() {
        let mut threads = Vec::new();

        let next = take_page(&mut threads, page(true, Some("c1"), "PRRT_a"), 7).unwrap();
        assert_eq!(next.as_deref(), Some("c1"));

        let next = take_page(&mut threads, page(false, Some("c2"), "PRRT_b"), 7).unwrap();
        assert_eq!(next, None);

        let ids: Vec<&str> = threads.iter().map(|t| t.thread_id.as_str()).collect();
        assert_eq!(ids, ["PRRT_a", "PRRT_b"]);
    }

    #[test]
    fn test_take_page_stops_without_cursor() {
        let mut threads = Vec::new();
        let next = take_page(&mut threads, page(true, None, "PRRT_a"), 7).unwrap();
        assert_eq!(next, None);
        assert_eq!(threads.len(), 1);
    }

    #[test]
    fn test_take_page_missing_pull_request() {
        let data: ThreadsData =
            serde_json::from_str(r#"{"repository": {"pullRequest": null}}"#).unwrap();
        let mut threads = Vec::new();
        let err = take_page(&mut threads, data, 9).unwrap_err();
        assert!(matches!(err, Error::PrNotFound(9)));
        assert!(threads.is_empty());
    }

    #[test]
    fn test_partial_errors_keep_threads() {
        let body = json!({
            "data": {
                "repository": {
                    "pullRequest": {
                        "reviewThreads": {
                            "pageInfo": { "hasNextPage": false, "endCursor": null },
                            "nodes": [{
                                "id": "PRRT_x",
                                "isResolved": true,
                                "isOutdated": false,
                                "line": 1,
                                "originalLine": 1,
                                "path": "a.rs",
                                "resolvedBy": null,
                                "comments": { "nodes": [] }
                            }]
                        }
                    }
                }
            },
            "errors": [{
                "message": "Resource not accessible by integration",
                "path": ["repository", "pullRequest", "reviewThreads", "nodes", 0, "resolvedBy"]
            }]
        });
        let response: GraphQLResponse<ThreadsData> = serde_json::from_value(body).unwrap();
        let data = response.into_data().unwrap();

        let mut threads = Vec::new();
        take_page(&mut threads, data, 1).unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].thread_id, "PRRT_x");
        assert_eq!(threads[0].resolved_by, None);
    }

    #[test]
    fn test_parse_resolve_payload() {
        let data: ResolveData = serde_json::from_str(
            r#"{"resolveReviewThread": {"thread": {"id": "PRRT_1", "isResolved": true}}}"#,
        )
        .unwrap();
        assert!(data.resolve_review_thread.unwrap().thread.unwrap().is_resolved);
    }
}
