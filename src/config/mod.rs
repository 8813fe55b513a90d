use crate::core::path::config_file;
use crate::core::{BrewError, BrewResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "BREWHASH_CONFIG";

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "BREWHASH_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Homebrew JSON API
    ///
    /// Formula documents are fetched from `{api_url}/formula/{id}.json`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bottle platform tags to hash, in the order they are fetched
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://formulae.brew.sh/api".to_string()
}

fn default_platforms() -> Vec<String> {
    vec!["catalina".to_string(), "mojave".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("brewhash/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            platforms: default_platforms(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load config from `$BREWHASH_CONFIG` or the platform-specific config
    /// directory, falling back to defaults when the file doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\brewhash\config.yaml
    /// - Linux: ~/.config/brewhash/config.yaml
    /// - macOS: ~/Library/Application Support/brewhash/config.yaml
    ///
    /// `$BREWHASH_API_URL`, when set, wins over the file's `api_url`.
    pub fn load() -> BrewResult<Self> {
        let config_path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => config_file()?,
        };

        let mut config = Self::load_from(&config_path)?;

        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            if !api_url.is_empty() {
                config.api_url = api_url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path, using defaults if it doesn't exist
    pub fn load_from(path: &Path) -> BrewResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            BrewError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Reject settings no lookup could work with
    pub fn validate(&self) -> BrewResult<()> {
        if self.platforms.is_empty() {
            return Err(BrewError::Config(
                "At least one bottle platform must be configured".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(BrewError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(BrewError::Config("api_url must not be empty".to_string()));
        }
        Ok(())
    }
}
