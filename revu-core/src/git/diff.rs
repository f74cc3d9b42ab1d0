//! Unified diffs against HEAD for thread classification

use std::path::Path;

use git2::{DiffFormat, DiffOptions, ErrorCode};
use tracing::debug;

use super::GitRepo;
use crate::audit::DiffSource;
use crate::Result;

impl DiffSource for GitRepo {
    fn diff_to_head(&self, base: &str, path: &str) -> Result<String> {
        let repo = self.inner();
        let base_tree = repo.revparse_single(base)?.peel_to_tree()?;
        let head_tree = repo.head()?.peel_to_tree()?;

        let mut opts = DiffOptions::new();
        opts.pathspec(path).disable_pathspec_match(true);

        let diff = repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?;

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        debug!(base, path, bytes = patch.len(), "Computed diff against HEAD");
        Ok(patch)
    }

    fn exists_at_head(&self, path: &str) -> Result<bool> {
        let head_tree = self.inner().head()?.peel_to_tree()?;
        match head_tree.get_path(Path::new(path)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{check_overlap, parse_hunks, Hunk};
    use crate::git::repo::tests::{commit_files, init_repo};

    fn numbered(lines: usize) -> String {
        (1..=lines).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_diff_reports_changed_hunk() {
        let (dir, repo) = init_repo();
        let base = commit_files(&repo, &[("src/a.rs", Some(numbered(30).as_str()))], "base").to_string();

        let mut changed = numbered(30).replace("line 20\n", "line twenty\n");
        changed.push_str("line 31\n");
        commit_files(&repo, &[("src/a.rs", Some(changed.as_str()))], "edit");

        let git = GitRepo::open(dir.path()).unwrap();
        let diff = git.diff_to_head(&base, "src/a.rs").unwrap();
        let hunks = parse_hunks(&diff);

        assert!(diff.contains("+line twenty"));
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0], Hunk { start: 17, count: 7 });
        assert!(check_overlap(&git, Some(base.as_str()), "src/a.rs", 20).overlaps);
        assert!(!check_overlap(&git, Some(base.as_str()), "src/a.rs", 5).overlaps);
    }

    #[test]
    fn test_diff_scoped_to_path() {
        let (dir, repo) = init_repo();
        let base = commit_files(
            &repo,
            &[("a.rs", Some("a\n")), ("a.rs.bak", Some("x\n"))],
            "base",
        )
        .to_string();
        commit_files(&repo, &[("a.rs.bak", Some("y\n"))], "edit other file");

        let git = GitRepo::open(dir.path()).unwrap();
        let diff = git.diff_to_head(&base, "a.rs").unwrap();
        assert!(diff.trim().is_empty());
        assert_eq!(
            check_overlap(&git, Some(base.as_str()), "a.rs", 1).evidence,
            "no changes in file"
        );
    }

    #[test]
    fn test_unknown_commit_fails() {
        let (dir, repo) = init_repo();
        commit_files(&repo, &[("a.rs", Some("a\n"))], "base");

        let git = GitRepo::open(dir.path()).unwrap();
        assert!(git
            .diff_to_head("0123456789abcdef0123456789abcdef01234567", "a.rs")
            .is_err());
    }

    #[test]
    fn test_exists_at_head() {
        let (dir, repo) = init_repo();
        commit_files(&repo, &[("keep.rs", Some("k\n")), ("drop.rs", Some("d\n"))], "base");
        commit_files(&repo, &[("drop.rs", None)], "remove");

        let git = GitRepo::open(dir.path()).unwrap();
        assert!(git.exists_at_head("keep.rs").unwrap());
        assert!(!git.exists_at_head("drop.rs").unwrap());
        assert!(!git.exists_at_head("never/existed.rs").unwrap());
    }

    #[test]
    fn test_deleted_file_with_missing_base_is_addressed() {
        let (dir, repo) = init_repo();
        commit_files(&repo, &[("keep.rs", Some("k\n")), ("drop.rs", Some("d\n"))], "base");
        commit_files(&repo, &[("drop.rs", None)], "remove");

        let git = GitRepo::open(dir.path()).unwrap();
        let missing = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(
            check_overlap(&git, Some(missing), "drop.rs", 1).evidence,
            "file deleted"
        );
        assert_eq!(
            check_overlap(&git, Some(missing), "keep.rs", 1).evidence,
            "diff failed"
        );
    }
}
