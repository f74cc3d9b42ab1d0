//! Thread status classification

use tracing::debug;

use super::overlap::{check_overlap, DiffSource};
use super::thread::{ReviewThread, ThreadStatus};

const OUTDATED_EVIDENCE: &str = "GitHub detected code changed";
const UNVERIFIABLE_EVIDENCE: &str = "unable to verify (missing commit/line info)";

/// Classify every thread in place.
///
/// Precedence is fixed: a resolved thread is `Resolved` even when it is also
/// outdated, an outdated thread is `Outdated` without consulting git, and only
/// the remaining threads are checked against the diff since the originating
/// comment's commit.
pub fn classify<S: DiffSource + ?Sized>(source: &S, threads: &mut [ReviewThread]) {
    for thread in threads.iter_mut() {
        classify_thread(source, thread);
        debug!(
            thread_id = %thread.thread_id,
            status = %thread.status,
            evidence = thread.diff_evidence.as_deref().unwrap_or(""),
            "Classified thread"
        );
    }
}

fn classify_thread<S: DiffSource + ?Sized>(source: &S, thread: &mut ReviewThread) {
    if thread.is_resolved {
        thread.status = ThreadStatus::Resolved;
        thread.diff_evidence = Some(format!(
            "resolved by {}",
            thread.resolved_by.as_deref().unwrap_or("unknown")
        ));
        return;
    }

    if thread.is_outdated {
        thread.status = ThreadStatus::Outdated;
        thread.diff_evidence = Some(OUTDATED_EVIDENCE.to_string());
        return;
    }

    let overlap = match (thread.original_commit(), thread.original_line) {
        (Some(commit), Some(line)) => Some(check_overlap(source, Some(commit), &thread.path, line)),
        _ => None,
    };

    match overlap {
        Some(overlap) => {
            thread.status = if overlap.overlaps {
                ThreadStatus::Addressed
            } else {
                ThreadStatus::Unresolved
            };
            thread.diff_evidence = Some(overlap.evidence);
        }
        None => {
            thread.status = ThreadStatus::Unresolved;
            thread.diff_evidence = Some(UNVERIFIABLE_EVIDENCE.to_string());
        }
    }
}
