use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, ScraperError};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("prospect_scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Defaults when no config file is present; an unreadable or invalid
    /// file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
