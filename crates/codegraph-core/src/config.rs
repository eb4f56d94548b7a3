//! Repository-level configuration (spec §6): which paths to ignore,
//! which languages to index, and how loud the logger should be.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

pub const CONFIG_DIR: &str = ".codegraph";
pub const CONFIG_FILE: &str = "config.json";
pub const IGNORE_FILE: &str = ".codegraphignore";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration for a single indexing run. Constructed by
/// [`Config::load`] or built directly in embedding code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glob patterns excluded from the walk. A leading `!` re-includes
    /// a path an earlier pattern excluded (gitignore semantics).
    pub ignore_patterns: Vec<String>,
    /// Restrict indexing to these languages. `None` indexes every
    /// language the registry supports.
    pub languages: Option<Vec<String>>,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            languages: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load `<repo_root>/.codegraph/config.json`, falling back to
    /// defaults if the file is absent. A present-but-unparseable file
    /// is a warning, not a fatal error — same recovery policy as the
    /// ignore-pattern compile-time validation below.
    pub fn load(repo_root: &Path) -> Result<Config> {
        let path = repo_root.join(CONFIG_DIR).join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| IndexError::IoFailure {
            path: path.clone(),
            source,
        })?;

        match serde_json::from_str::<Config>(&raw) {
            Ok(cfg) => {
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config parse failed, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Compile `ignore_patterns` into a matcher up front, so a bad glob
    /// surfaces as `InvalidConfig` before the walk starts rather than
    /// mid-index.
    pub fn validate(&self) -> Result<()> {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.ignore_patterns {
            let trimmed = pattern.strip_prefix('!').unwrap_or(pattern);
            let glob = globset::Glob::new(trimmed)
                .map_err(|e| IndexError::InvalidConfig(format!("bad ignore pattern {pattern:?}: {e}")))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| IndexError::InvalidConfig(format!("could not compile ignore patterns: {e}")))?;
        Ok(())
    }
}
