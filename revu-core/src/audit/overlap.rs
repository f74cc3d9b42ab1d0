//! Line overlap between a review comment and later changes

use tracing::debug;

use super::hunk::parse_hunks;
use crate::Result;

/// Source of unified diffs against the current tree
///
/// Implemented by [`crate::GitRepo`]; tests substitute in-memory fakes.
pub trait DiffSource {
    /// Unified diff of `path` between `base` and the current tree.
    ///
    /// Fails when the diff cannot be produced at all, e.g. because `base` no
    /// longer exists in the repository.
    fn diff_to_head(&self, base: &str, path: &str) -> Result<String>;

    /// Whether `path` exists in the current tree
    fn exists_at_head(&self, path: &str) -> Result<bool>;
}

/// Outcome of an overlap check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    /// A change touches the commented line
    pub overlaps: bool,
    /// Explanation suitable for a report
    pub evidence: String,
}

impl Overlap {
    fn yes(evidence: impl Into<String>) -> Self {
        Self {
            overlaps: true,
            evidence: evidence.into(),
        }
    }

    fn no(evidence: impl Into<String>) -> Self {
        Self {
            overlaps: false,
            evidence: evidence.into(),
        }
    }
}

/// Check whether any change between `base_commit` and the current tree
/// touches `original_line` of `path`.
///
/// A file that can no longer be diffed and is gone from the current tree counts
/// as overlapping, since the commented code no longer exists. Any other failure
/// to obtain a diff reports no overlap. Overlap uses [`super::Hunk::overlaps`],
/// which includes the line right after each hunk.
pub fn check_overlap<S: DiffSource + ?Sized>(
    source: &S,
    base_commit: Option<&str>,
    path: &str,
    original_line: u64,
) -> Overlap {
    let base = match base_commit {
        Some(base) if !base.is_empty() => base,
        _ => return Overlap::no("no original commit"),
    };

    let diff = match source.diff_to_head(base, path) {
        Ok(diff) => diff,
        Err(e) => {
            debug!(base, path, error = %e, "Diff failed, checking whether file still exists");
            return match source.exists_at_head(path) {
                Ok(false) => Overlap::yes("file deleted"),
                Ok(true) => Overlap::no("diff failed"),
                Err(e) => {
                    debug!(path, error = %e, "Existence check failed");
                    Overlap::no("diff failed")
                }
            };
        }
    };

    if diff.trim().is_empty() {
        return Overlap::no("no changes in file");
    }

    parse_hunks(&diff)
        .into_iter()
        .find(|hunk| hunk.overlaps(original_line))
        .map(|hunk| {
            Overlap::yes(format!(
                "hunk @@ -{},{} overlaps line {}",
                hunk.start, hunk.count, original_line
            ))
        })
        .unwrap_or_else(|| Overlap::no(format!("no hunk overlaps line {}", original_line)))
}
