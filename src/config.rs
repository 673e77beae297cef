use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the collector base URL
pub const BASE_URL_ENV: &str = "INSAYT_URL";
/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "INSAYT_CONFIG";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002";
pub const COLLECT_PATH: &str = "/api/collect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Tracker configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Collector base URL, without the collect path
    pub base_url: String,
    /// Site ID used by the CLI when `--site-id` is not given
    pub site_id: String,
    /// Visitor ID used by the CLI when `--visitor-id` is not given
    pub visitor_id: String,
    /// Per-request timeout; no timeout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_id: "your-site-id".to_string(),
            visitor_id: "server".to_string(),
            timeout_secs: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply `INSAYT_URL`
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.base_url = resolve_base_url(std::env::var(BASE_URL_ENV).ok(), &config.base_url);
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            let path = Self::expand_path(path);
            return Self::load_from_file(&path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = Self::expand_path(Path::new(&env_path));
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", CONFIG_ENV, e);
                    }
                }
            }
        }

        // Try ~/.config/insayt/insayt.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("insayt").join("insayt.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./insayt.yaml (for development)
        let local_config = PathBuf::from("insayt.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Full URL of the collect endpoint; trailing slashes on the base are dropped
    pub fn collect_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), COLLECT_PATH)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

/// Pick the environment value when set and non-empty, else the fallback
pub fn resolve_base_url(env_value: Option<String>, fallback: &str) -> String {
    match env_value {
        Some(value) if !value.is_empty() => value,
        _ => fallback.to_string(),
    }
}
