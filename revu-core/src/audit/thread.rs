//! Review thread data model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolution status assigned to a review thread by classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreadStatus {
    /// Explicitly resolved on the platform
    Resolved,
    /// The platform reports the anchor no longer matches current code
    Outdated,
    /// A later change overlaps the commented line
    Addressed,
    /// Feedback still needs attention
    #[default]
    Unresolved,
}

impl ThreadStatus {
    /// All statuses, in report order
    pub const ALL: [ThreadStatus; 4] = [
        ThreadStatus::Resolved,
        ThreadStatus::Outdated,
        ThreadStatus::Addressed,
        ThreadStatus::Unresolved,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ThreadStatus::Resolved => "Resolved",
            ThreadStatus::Outdated => "Outdated",
            ThreadStatus::Addressed => "Addressed",
            ThreadStatus::Unresolved => "Unresolved",
        }
    }
}

impl fmt::Display for ThreadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single comment within a review thread
#[derive(Debug, Clone, Serialize)]
pub struct ThreadComment {
    /// Author login
    pub author: String,
    /// Comment body
    pub body: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// Whether the platform considers this comment's anchor stale
    pub outdated: bool,
    /// Commit the comment's diff context was anchored to
    #[serde(skip_serializing)]
    pub original_commit_oid: Option<String>,
}

/// A review conversation anchored to one file location
#[derive(Debug, Clone, Serialize)]
pub struct ReviewThread {
    /// Platform-assigned thread ID
    pub thread_id: String,
    /// File path the thread is anchored to
    pub path: String,
    /// Current line, if the platform can still map it
    pub line: Option<u64>,
    /// Line at the time of the originating comment
    pub original_line: Option<u64>,
    /// Resolved on the platform
    pub is_resolved: bool,
    /// Marked outdated by the platform
    pub is_outdated: bool,
    /// Login of whoever resolved the thread
    pub resolved_by: Option<String>,
    /// Diff context shown when the thread was started
    #[serde(skip_serializing)]
    pub diff_hunk: String,
    /// Comments in chronological order
    pub comments: Vec<ThreadComment>,
    /// Classification result
    pub status: ThreadStatus,
    /// Explanation for the classification
    pub diff_evidence: Option<String>,
}

impl ReviewThread {
    /// The comment that started the thread
    pub fn first_comment(&self) -> Option<&ThreadComment> {
        self.comments.first()
    }

    /// Commit the originating comment was made against
    pub fn original_commit(&self) -> Option<&str> {
        self.first_comment()
            .and_then(|c| c.original_commit_oid.as_deref())
            .filter(|oid| !oid.is_empty())
    }

    /// `path:line` using the original line, `?` when unknown
    pub fn location(&self) -> String {
        match self.original_line {
            Some(line) => format!("{}:{}", self.path, line),
            None => format!("{}:?", self.path),
        }
    }
}
