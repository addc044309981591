use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::models::GeoBounds;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Maximum candidates requested per search
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub bounds: GeoBounds,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Sent as the User-Agent header
    pub user_agent: String,
    /// accept-language
    pub language: String,
    /// countrycodes, comma separated
    pub country_codes: String,
    /// Appended to the free-text query, e.g. "Venezuela"
    pub region_hint: Option<String>,
    pub limit: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "AquaNova/1.0".to_string(),
            language: "es".to_string(),
            country_codes: "ve".to_string(),
            region_hint: Some("Venezuela".to_string()),
            limit: MAX_RESULTS,
        }
    }
}

/// Caller-side typing contract
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_query_len: usize,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.provider.limit = config.provider.limit.clamp(1, MAX_RESULTS);
        Ok(config)
    }
}
