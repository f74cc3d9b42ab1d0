//! Configuration management for revu
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REVU_*)
//! 3. Config file (~/.config/revu/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output format for audit reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Config(format!(
                "Unknown report format '{}'. Expected 'markdown' or 'json'",
                other
            ))),
        }
    }
}

/// GitHub API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GraphQL endpoint
    pub graphql_url: String,

    /// Timeout applied to each GitHub request
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Number of review threads fetched per GraphQL page
    pub page_size: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://api.github.com/graphql".to_string(),
            timeout: Duration::from_secs(30),
            page_size: 100,
        }
    }
}

/// Audit defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Report format
    pub format: ReportFormat,

    /// Hide resolved threads from the markdown report
    pub exclude_resolved: bool,

    /// Resolve threads confirmed addressed
    pub auto_resolve: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration
    pub github: GitHubConfig,

    /// Audit configuration
    pub audit: AuditConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/revu/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revu").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.github.page_size) {
            return Err(Error::Config(format!(
                "github.page_size must be between 1 and 100, got {}",
                self.github.page_size
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REVU_GRAPHQL_URL: GraphQL endpoint
    /// - REVU_FORMAT: report format (markdown, json)
    /// - REVU_AUTO_RESOLVE: resolve addressed threads (1/true)
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = var("REVU_GRAPHQL_URL") {
            self.github.graphql_url = url;
        }

        if let Some(format) = var("REVU_FORMAT") {
            self.audit.format = format.parse()?;
        }

        if let Some(flag) = var("REVU_AUTO_RESOLVE") {
            self.audit.auto_resolve = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    ///
    /// Flags can only switch behaviour on; an absent flag keeps the configured value.
    pub fn with_cli_overrides(mut self, json: bool, exclude_resolved: bool, auto_resolve: bool) -> Self {
        if json {
            self.audit.format = ReportFormat::Json;
        }

        if exclude_resolved {
            self.audit.exclude_resolved = true;
        }

        if auto_resolve {
            self.audit.auto_resolve = true;
        }

        self
    }

    /// Load configuration with file and environment overrides applied
    pub fn load_with_env() -> Result<Self> {
        Self::load()?.with_env_overrides()
    }
}
