//! Board configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! absent file means "run with defaults in the current directory".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::storage::validate_collection_name;

/// Errors raised while loading or validating configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub String);

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the collection files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the topics collection
    #[serde(default = "default_topics_file")]
    pub topics_file: String,

    /// File name of the posts collection
    #[serde(default = "default_posts_file")]
    pub posts_file: String,

    /// Posts shown on the home page
    #[serde(default = "default_recent_posts")]
    pub recent_posts: usize,

    /// Minimum log severity ("trace", "info", "warn", "error", "fatal")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: HttpServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_topics_file() -> String {
    "topics.json".to_string()
}
fn default_posts_file() -> String {
    "posts.json".to_string()
}
fn default_recent_posts() -> usize {
    3
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            topics_file: default_topics_file(),
            posts_file: default_posts_file(),
            recent_posts: default_recent_posts(),
            log_level: default_log_level(),
            server: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Board rooted at `data_dir` with default file names
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topics_file.trim().is_empty() {
            return Err(ConfigError("topics_file must not be empty".to_string()));
        }

        if self.posts_file.trim().is_empty() {
            return Err(ConfigError("posts_file must not be empty".to_string()));
        }

        for (field, name) in [("topics_file", &self.topics_file), ("posts_file", &self.posts_file)] {
            validate_collection_name(name)
                .map_err(|e| ConfigError(format!("{} must be a plain file name: {}", field, e)))?;
        }

        if self.topics_file == self.posts_file {
            return Err(ConfigError(format!(
                "topics_file and posts_file must differ (both '{}')",
                self.topics_file
            )));
        }

        if self.recent_posts == 0 {
            return Err(ConfigError("recent_posts must be > 0".to_string()));
        }

        self.severity()?;

        self.server.parsed_cors_origins().map_err(ConfigError)?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.log_level.parse().map_err(ConfigError)
    }

    pub fn topics_path(&self) -> PathBuf {
        self.data_dir.join(&self.topics_file)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(&self.posts_file)
    }
}
