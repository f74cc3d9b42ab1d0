//! Markdown and JSON rendering of audit results

use std::collections::HashMap;

use chrono::SecondsFormat;

use super::thread::{ReviewThread, ThreadStatus};
use crate::Result;

/// Maximum length of a comment excerpt in the details table
const EXCERPT_LEN: usize = 80;

/// Collapse newlines and cut `text` to at most `max_len` characters
pub fn truncate(text: &str, max_len: usize) -> String {
    let text = text.replace('\n', " ");
    let text = text.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn marker(status: ThreadStatus) -> &'static str {
    match status {
        ThreadStatus::Resolved => "OK",
        ThreadStatus::Outdated => "~~",
        ThreadStatus::Addressed => "->",
        ThreadStatus::Unresolved => "!!",
    }
}

/// Render a markdown audit report
pub fn render_markdown(threads: &[ReviewThread], exclude_resolved: bool) -> String {
    let threads: Vec<&ReviewThread> = threads
        .iter()
        .filter(|t| !exclude_resolved || t.status != ThreadStatus::Resolved)
        .collect();

    if threads.is_empty() {
        return "# PR Feedback Audit\n\nAll review threads are resolved.".to_string();
    }

    let mut counts: HashMap<ThreadStatus, usize> = HashMap::new();
    for t in &threads {
        *counts.entry(t.status).or_default() += 1;
    }

    let mut lines = vec!["# PR Feedback Audit\n".to_string(), "## Summary\n".to_string()];
    for status in ThreadStatus::ALL {
        if let Some(count) = counts.get(&status) {
            lines.push(format!("- **{}**: {} {}", status, count, marker(status)));
        }
    }
    lines.push(String::new());

    lines.push("## Details\n".to_string());
    lines.push("| Status | File | Reviewer | Comment | Evidence |".to_string());
    lines.push("|--------|------|----------|---------|----------|".to_string());
    for t in &threads {
        let first = t.first_comment();
        let reviewer = first.map(|c| c.author.as_str()).unwrap_or("?");
        let body = first
            .map(|c| truncate(&c.body, EXCERPT_LEN))
            .unwrap_or_default();
        let location = match t.original_line {
            Some(line) => format!("`{}:{}`", t.path, line),
            None => format!("`{}`", t.path),
        };
        lines.push(format!(
            "| **{}** | {} | {} | {} | {} |",
            t.status,
            location,
            reviewer,
            body,
            t.diff_evidence.as_deref().unwrap_or("")
        ));
    }

    let unresolved: Vec<_> = threads
        .iter()
        .filter(|t| t.status == ThreadStatus::Unresolved)
        .collect();
    if !unresolved.is_empty() {
        lines.push("\n## Unresolved Threads (Action Required)\n".to_string());
        for (i, t) in unresolved.iter().enumerate() {
            lines.push(format!("### {}. `{}`\n", i + 1, t.location()));
            if let Some(first) = t.first_comment() {
                lines.push(format!(
                    "**{}** ({}):\n",
                    first.author,
                    first.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
                ));
                lines.push(format!("> {}\n", first.body));
            }
            if !t.diff_hunk.is_empty() {
                lines.push("```diff".to_string());
                lines.push(t.diff_hunk.clone());
                lines.push("```\n".to_string());
            }
        }
    }

    lines.join("\n")
}

/// Render threads as a pretty-printed JSON array
pub fn render_json(threads: &[ReviewThread]) -> Result<String> {
    Ok(serde_json::to_string_pretty(threads)?)
}
