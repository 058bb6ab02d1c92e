use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Env var that overrides `api.base_url` (also read from `.env`).
pub const API_BASE_ENV: &str = "F1DASH_API_BASE";

const DEFAULT_API_BASE: &str = "https://api.jolpi.ca/ergast/f1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub api: ApiConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct General {
    /// Default tracing directive when RUST_LOG is unset
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Driver cards on the home page
    pub top_drivers: usize,
    /// Race cards on the home page
    pub upcoming_races: usize,
    /// Team colour swatches. None = only when stdout is a terminal.
    pub color: Option<bool>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_drivers: 5,
            upcoming_races: 4,
            color: None,
        }
    }
}

impl Config {
    /// Load from a TOML file. A missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.apply_env(std::env::var(API_BASE_ENV).ok());
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_env(&mut self, api_base: Option<String>) {
        if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
            self.api.base_url = base;
        }
    }
}
