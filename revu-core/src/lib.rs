//! Revu Core - Review-thread classification for pull request feedback audits
//!
//! This crate decides, for every review thread on a pull request, whether the
//! feedback it carries has been resolved, outdated, addressed by a later change,
//! or is still open. Git and GitHub access are injected through the
//! [`DiffSource`] and [`ThreadResolver`] traits so the engine can be driven by
//! fakes in tests.

pub mod audit;
pub mod config;
pub mod error;
pub mod git;
pub mod secrets;

pub use audit::{
    auto_resolve, check_overlap, classify, parse_hunks, AutoResolveSummary, DiffSource, Hunk,
    Overlap, ResolveFailure, ReviewThread, ThreadComment, ThreadResolver, ThreadStatus,
};
pub use config::{AuditConfig, Config, GitHubConfig, ReportFormat};
pub use error::{Error, Result};
pub use git::{GitRepo, RemoteInfo};
pub use secrets::Secrets;
