use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "LAUNCH_FEED_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Launches collection endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Viewport height in pixels reported with terminal scroll events
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "https://api.spacexdata.com/v3/launches".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("launch-feed/{}", env!("CARGO_PKG_VERSION"))
}

fn default_viewport_height() -> u32 {
    800
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            viewport_height: default_viewport_height(),
            log_dir: default_log_dir(),
            log_level: default_log_level(),
        }
    }
}

impl FeedConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FeedConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `$LAUNCH_FEED_CONFIG` or `config.toml`, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_or_default(&path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config {:?}: {}", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FeedConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api_url, "https://api.spacexdata.com/v3/launches");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://localhost:8080/launches\"").unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();

        let config = FeedConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/launches");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.viewport_height, 800);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = \"soon\"").unwrap();
        assert!(FeedConfig::load_or_default(file.path()).is_err());
    }
}
