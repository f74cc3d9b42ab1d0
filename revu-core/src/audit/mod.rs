//! Pull request feedback audit
//!
//! Classifies review threads against the local git history and optionally
//! resolves threads whose commented code has since changed. The pipeline runs
//! one way: fetched threads are classified with [`classify`], then
//! [`auto_resolve`] may promote addressed threads to resolved, then the
//! [`report`] module renders the result.

mod classify;
mod hunk;
mod overlap;
pub mod report;
mod resolve;
mod thread;

pub use classify::classify;
pub use hunk::{parse_hunks, Hunk};
pub use overlap::{check_overlap, DiffSource, Overlap};
pub use resolve::{auto_resolve, AutoResolveSummary, ResolveFailure, ThreadResolver};
pub use thread::{ReviewThread, ThreadComment, ThreadStatus};
