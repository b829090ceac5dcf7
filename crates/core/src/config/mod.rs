//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (CLOUDINFO_*)
//! 2. TOML config file (if CLOUDINFO_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Interval of the short-lived price refresh. Not configurable.
pub const SHORT_LIVED_RENEWAL_INTERVAL: Duration = Duration::from_secs(4 * 60);

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (CLOUDINFO_*)
/// 2. TOML config file (if CLOUDINFO_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identifiers of the providers to scrape.
    ///
    /// Set via CLOUDINFO_PROVIDERS environment variable (e.g. `[amazon,google]`).
    #[serde(default)]
    pub providers: Vec<String>,

    /// Directory holding one `<provider>.json` catalog per provider.
    ///
    /// Set via CLOUDINFO_CATALOG_DIR environment variable.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Interval of the full refresh cycle in seconds.
    ///
    /// Set via CLOUDINFO_RENEWAL_INTERVAL_SECS environment variable.
    #[serde(default = "default_renewal_interval_secs")]
    pub renewal_interval_secs: u64,

    /// TTL of long-lived entries (everything but prices) in seconds.
    ///
    /// Set via CLOUDINFO_CACHE_LONG_TTL_SECS environment variable.
    #[serde(default = "default_cache_long_ttl_secs")]
    pub cache_long_ttl_secs: u64,

    /// TTL of price entries in seconds.
    ///
    /// Set via CLOUDINFO_CACHE_SHORT_TTL_SECS environment variable.
    #[serde(default = "default_cache_short_ttl_secs")]
    pub cache_short_ttl_secs: u64,

    /// How long shutdown waits for in-flight scrape tasks, in milliseconds.
    ///
    /// Set via CLOUDINFO_SHUTDOWN_TIMEOUT_MS environment variable.
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("./catalogs")
}

fn default_renewal_interval_secs() -> u64 {
    86_400 // 24h
}

fn default_cache_long_ttl_secs() -> u64 {
    172_800 // 48h
}

fn default_cache_short_ttl_secs() -> u64 {
    600
}

fn default_shutdown_timeout_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            catalog_dir: default_catalog_dir(),
            renewal_interval_secs: default_renewal_interval_secs(),
            cache_long_ttl_secs: default_cache_long_ttl_secs(),
            cache_short_ttl_secs: default_cache_short_ttl_secs(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
        }
    }
}

impl AppConfig {
    pub fn renewal_interval(&self) -> Duration {
        Duration::from_secs(self.renewal_interval_secs)
    }

    pub fn cache_long_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_long_ttl_secs)
    }

    pub fn cache_short_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_short_ttl_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Path of the catalog file for a provider.
    pub fn catalog_path(&self, provider: &str) -> PathBuf {
        self.catalog_dir.join(format!("{provider}.json"))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `CLOUDINFO_`
    /// 2. TOML file from `CLOUDINFO_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config_file = std::env::var("CLOUDINFO_CONFIG_FILE").ok();
        Self::load_from(config_file.as_deref().map(Path::new))
    }

    fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed("CLOUDINFO_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
