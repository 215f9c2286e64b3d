//! Process configuration.
//!
//! Loaded once at startup from an optional YAML file and a couple of
//! environment overrides, then handed by reference to whatever needs it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Default file looked up in the working directory when `BEACON_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "beacon.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub stocks: StocksConfig,
    pub mime: MimeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

/// Candidate static roots, searched in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub roots: Vec<PathBuf>,
}

/// Upstream quote API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StocksConfig {
    pub base_url: String,
    pub api_key: String,
    pub function: String,
    pub default_symbol: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MimeConfig {
    /// Extension (no dot) to content type, merged over the built-in table.
    pub overrides: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:35000".to_string(),
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            roots: vec![
                PathBuf::from("static"),
                PathBuf::from("target/static"),
                PathBuf::from("public"),
                PathBuf::from("resources/static"),
            ],
        }
    }
}

impl Default for StocksConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co/query".to_string(),
            // Alpha Vantage's public key; it only answers for the IBM symbol,
            // so `fb` needs a real key from config or STOCKS_API_KEY.
            api_key: "demo".to_string(),
            function: "TIME_SERIES_DAILY".to_string(),
            default_symbol: "fb".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl StocksConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads the configuration for this process.
    ///
    /// Reads the file named by `BEACON_CONFIG`, falling back to
    /// [`DEFAULT_CONFIG_FILE`] when it exists, then to built-in defaults.
    /// `LISTEN` and `STOCKS_API_KEY` override the matching fields.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("BEACON_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(key) = std::env::var("STOCKS_API_KEY") {
            cfg.stocks.api_key = key;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}
