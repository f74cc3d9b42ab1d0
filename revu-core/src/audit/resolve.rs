//! Auto-resolution of addressed threads

use async_trait::async_trait;
use tracing::{info, warn};

use super::thread::{ReviewThread, ThreadStatus};
use crate::Result;

/// Marks review threads resolved on the hosting platform
#[async_trait]
pub trait ThreadResolver: Send + Sync {
    /// Resolve a thread by ID.
    ///
    /// Returns `Ok(true)` when the platform confirms the thread is resolved.
    async fn resolve(&self, thread_id: &str) -> Result<bool>;
}

/// A thread that could not be auto-resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveFailure {
    /// Thread that stayed addressed
    pub thread_id: String,
    /// Why resolution failed
    pub reason: String,
}

/// Outcome of an auto-resolve pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoResolveSummary {
    /// IDs of threads that were resolved
    pub resolved: Vec<String>,
    /// Threads whose resolution failed
    pub failures: Vec<ResolveFailure>,
}

/// Resolve every `Addressed` thread through `resolver`.
///
/// Successfully resolved threads become `Resolved` and get `" (auto-resolved)"`
/// appended to their evidence. Failures leave the thread untouched and are
/// collected in the returned summary. Threads in any other status are skipped.
/// Call this only after the whole collection has been classified.
pub async fn auto_resolve<R: ThreadResolver + ?Sized>(
    resolver: &R,
    threads: &mut [ReviewThread],
) -> AutoResolveSummary {
    let mut summary = AutoResolveSummary::default();

    for thread in threads
        .iter_mut()
        .filter(|t| t.status == ThreadStatus::Addressed)
    {
        let reason = match resolver.resolve(&thread.thread_id).await {
            Ok(true) => {
                thread.status = ThreadStatus::Resolved;
                let evidence = thread.diff_evidence.take().unwrap_or_default();
                thread.diff_evidence = Some(format!("{} (auto-resolved)", evidence));
                info!(location = %thread.location(), "Resolved thread");
                summary.resolved.push(thread.thread_id.clone());
                continue;
            }
            Ok(false) => "platform did not report the thread as resolved".to_string(),
            Err(e) => e.to_string(),
        };

        warn!(thread_id = %thread.thread_id, %reason, "Failed to resolve thread");
        summary.failures.push(ResolveFailure {
            thread_id: thread.thread_id.clone(),
            reason,
        });
    }

    summary
}
