//! Git repository detection and operations

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// Information about a git remote
#[derive(Debug, Clone)]
pub struct RemoteInfo {
    /// Name of the remote (e.g., "origin")
    pub name: String,
    /// URL of the remote
    pub url: String,
}

/// A git repository wrapper used to locate and audit a pull request
pub struct GitRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Path to the repository root
    root: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// This will search upward from the given path to find the repository root.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Config(format!(
                    "Not a git repository: {}. Run revu from inside the pull request's checkout.",
                    path.display()
                ))
            } else {
                Error::Git(e)
            }
        })?;

        let root = repo
            .workdir()
            .ok_or_else(|| Error::Config("Bare repositories are not supported".to_string()))?
            .to_path_buf();

        Ok(Self { repo, root })
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the default remote (usually "origin")
    pub fn default_remote(&self) -> Result<RemoteInfo> {
        // Try origin first
        if let Ok(remote) = self.repo.find_remote("origin") {
            if let Some(url) = remote.url() {
                return Ok(RemoteInfo {
                    name: "origin".to_string(),
                    url: url.to_string(),
                });
            }
        }

        // Fall back to first available remote
        let remotes = self.repo.remotes()?;

        for remote_name in remotes.iter().flatten() {
            if let Ok(remote) = self.repo.find_remote(remote_name) {
                if let Some(url) = remote.url() {
                    return Ok(RemoteInfo {
                        name: remote_name.to_string(),
                        url: url.to_string(),
                    });
                }
            }
        }

        Err(Error::Config(
            "No remotes configured. Pass --repo owner/repo or add a remote with 'git remote add origin <url>'"
                .to_string(),
        ))
    }

    /// Get the current branch name
    ///
    /// Returns `None` for a detached or unborn HEAD.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(Error::Git(e)),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    /// Get access to the underlying git2 repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    /// Write `files` and commit them on top of HEAD, returning the commit ID
    pub(crate) fn commit_files(repo: &Repository, files: &[(&str, Option<&str>)], message: &str) -> git2::Oid {
        let root = repo.workdir().unwrap().to_path_buf();
        let mut index = repo.index().unwrap();
        for (path, contents) in files {
            let full = root.join(path);
            match contents {
                Some(contents) => {
                    if let Some(parent) = full.parent() {
                        std::fs::create_dir_all(parent).unwrap();
                    }
                    std::fs::write(&full, contents).unwrap();
                    index.add_path(Path::new(path)).unwrap();
                }
                None => {
                    std::fs::remove_file(&full).unwrap();
                    index.remove_path(Path::new(path)).unwrap();
                }
            }
        }
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub(crate) fn init_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_open_non_git_dir() {
        let dir = TempDir::new().unwrap();
        let result = GitRepo::open(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_discovers_root_from_subdir() {
        let (dir, repo) = init_repo();
        commit_files(&repo, &[("src/lib.rs", Some("fn main() {}\n"))], "init");

        let opened = GitRepo::open(dir.path().join("src")).unwrap();
        assert_eq!(
            opened.root().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_default_remote_prefers_origin() {
        let (dir, repo) = init_repo();
        repo.remote("upstream", "https://github.com/up/stream.git").unwrap();
        repo.remote("origin", "git@github.com:owner/repo.git").unwrap();

        let opened = GitRepo::open(dir.path()).unwrap();
        let remote = opened.default_remote().unwrap();
        assert_eq!(remote.name, "origin");
        assert_eq!(remote.url, "git@github.com:owner/repo.git");
    }

    #[test]
    fn test_default_remote_missing() {
        let (dir, _repo) = init_repo();
        let opened = GitRepo::open(dir.path()).unwrap();
        assert!(opened.default_remote().is_err());
    }

    #[test]
    fn test_current_branch() {
        let (dir, repo) = init_repo();
        let opened = GitRepo::open(dir.path()).unwrap();
        assert_eq!(opened.current_branch().unwrap(), None);

        let commit = commit_files(&repo, &[("a.txt", Some("a\n"))], "init");
        let commit = repo.find_commit(commit).unwrap();
        repo.branch("feature/x", &commit, false).unwrap();
        repo.set_head("refs/heads/feature/x").unwrap();

        assert_eq!(opened.current_branch().unwrap().as_deref(), Some("feature/x"));
    }
}
