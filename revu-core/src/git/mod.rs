//! Git operations for revu
//!
//! This module provides repository discovery, remote/branch detection for
//! locating the pull request under audit, and the git2-backed
//! [`crate::DiffSource`] used by thread classification.

mod diff;
mod repo;

pub use repo::{GitRepo, RemoteInfo};
