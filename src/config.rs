use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

const CONFIG_PATH: &str = "config.toml";

/// Tunables for the upstream clients. Loaded from `config.toml` when the
/// file exists, otherwise compiled defaults apply.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ridb: RidbConfig,
    pub campflare: CampflareConfig,
    pub overpass: OverpassConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RidbConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// 50 requests/min budget = 1.2s between pagination requests
    pub page_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CampflareConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub state_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverpassConfig {
    /// Mirror base URLs tried in order until one answers
    pub mirrors: Vec<String>,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_secs: u64,
    pub state_delay_ms: u64,
}

impl Default for RidbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ridb.recreation.gov/api/v1".to_string(),
            timeout_seconds: 30,
            page_delay_ms: 1200,
        }
    }
}

impl Default for CampflareConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.campflare.com/v1".to_string(),
            timeout_seconds: 30,
            state_delay_ms: 500,
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            mirrors: vec![
                "https://overpass-api.de".to_string(),
                "https://overpass.kumi.systems".to_string(),
            ],
            timeout_seconds: 180,
            retry_attempts: 3,
            retry_delay_secs: 5,
            state_delay_ms: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ridb: RidbConfig::default(),
            campflare: CampflareConfig::default(),
            overpass: OverpassConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to
    /// defaults when no file is present.
    pub fn load() -> Result<Self> {
        if !Path::new(CONFIG_PATH).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(CONFIG_PATH)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ridb.page_delay_ms, 1200);
        assert_eq!(config.overpass.retry_attempts, 3);
        assert_eq!(config.overpass.mirrors.len(), 2);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: Config = toml::from_str(
            r#"
            [ridb]
            page_delay_ms = 2000
            "#,
        )
        .unwrap();
        assert_eq!(config.ridb.page_delay_ms, 2000);
        // Untouched sections keep their defaults
        assert_eq!(config.ridb.timeout_seconds, 30);
        assert_eq!(config.campflare.state_delay_ms, 500);
    }
}
