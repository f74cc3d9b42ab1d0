//! Secrets management for revu
//!
//! Secrets are stored separately from configuration to avoid accidental sharing.
//! The secrets file is located at `~/.config/revu/secrets.toml` and must have
//! restrictive permissions (0600 on Unix).
//!
//! Token lookup priority:
//! 1. Environment variables (GITHUB_TOKEN, then GH_TOKEN)
//! 2. Secrets file (~/.config/revu/secrets.toml)
//! 3. The GitHub CLI (`gh auth token`)

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Environment variables checked for a GitHub token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// GitHub configuration
    pub github: GitHubSecrets,
}

/// GitHub-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSecrets {
    /// GitHub Personal Access Token
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_secrets_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(path)?.permissions().mode();

            // Readable by group or others
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        if let Some(ref mut token) = secrets.github.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/revu/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revu").join("secrets.toml"))
    }

    /// Get a GitHub token from the first source that provides one
    pub fn github_token(&self) -> Option<String> {
        self.token_from(|key| std::env::var(key).ok())
            .or_else(gh_cli_token)
    }

    fn token_from(&self, var: impl Fn(&str) -> Option<String>) -> Option<String> {
        for key in TOKEN_ENV_VARS {
            if let Some(token) = var(key).and_then(non_empty) {
                debug!(source = key, "Using GitHub token from environment");
                return Some(token);
            }
        }

        if let Some(token) = self.github.token.clone().and_then(non_empty) {
            debug!("Using GitHub token from secrets file");
            return Some(token);
        }

        None
    }
}

fn non_empty(token: String) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Ask an authenticated GitHub CLI for its token
fn gh_cli_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;
    if !output.status.success() {
        debug!("gh auth token failed");
        return None;
    }
    let token = non_empty(String::from_utf8_lossy(&output.stdout).into_owned())?;
    debug!("Using GitHub token from gh CLI");
    Some(token)
}
