//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::types::{
    AppConfig, CacheConfig, IdConfig, LockConfig, LoggingConfig, RebuildConfig, StoreConfig,
};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use kvc_domain::constants::SECONDS_PER_DAY;
use kvc_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `KVC_CACHE__NULL_TTL_SECS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys so field names keep their underscores
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_NESTING_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).with_context(|| {
            format!("Failed to write config file {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Checks every section; the first violation is returned.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_store_config(&config.store)?;
    validate_cache_config(&config.cache)?;
    validate_lock_config(&config.lock)?;
    validate_id_config(&config.id)?;
    validate_rebuild_config(&config.rebuild)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Configuration {
        message: message.into(),
        source: None,
    }
}

fn validate_store_config(config: &StoreConfig) -> Result<()> {
    if config
        .redis_url
        .as_deref()
        .is_some_and(|url| url.trim().is_empty())
    {
        return Err(invalid("Redis URL cannot be empty"));
    }
    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.default_ttl_secs == 0 {
        return Err(invalid("Cache default TTL cannot be 0"));
    }
    if config.null_ttl_secs == 0 {
        return Err(invalid("Null marker TTL cannot be 0"));
    }
    if config.logical_ttl_secs == 0 {
        return Err(invalid("Logical TTL cannot be 0"));
    }
    if config.null_ttl_secs > config.default_ttl_secs {
        return Err(invalid(format!(
            "Null marker TTL ({}s) cannot exceed the default TTL ({}s)",
            config.null_ttl_secs, config.default_ttl_secs
        )));
    }
    Ok(())
}

fn validate_lock_config(config: &LockConfig) -> Result<()> {
    if config.ttl_secs == 0 {
        return Err(invalid("Lock TTL cannot be 0"));
    }
    if config.key_prefix.is_empty() {
        return Err(invalid("Lock key prefix cannot be empty"));
    }
    if config.retry_interval_ms == 0 {
        return Err(invalid("Lock retry interval cannot be 0"));
    }
    if config.max_attempts == 0 {
        return Err(invalid("Lock max attempts cannot be 0"));
    }
    Ok(())
}

fn validate_id_config(config: &IdConfig) -> Result<()> {
    if config.origin_epoch_secs < 0 {
        return Err(invalid("Id origin epoch cannot be negative"));
    }
    if config.key_prefix.is_empty() {
        return Err(invalid("Id counter key prefix cannot be empty"));
    }
    if config
        .counter_retention_secs
        .is_some_and(|secs| secs < SECONDS_PER_DAY)
    {
        return Err(invalid(format!(
            "Id counter retention must be at least {SECONDS_PER_DAY}s"
        )));
    }
    Ok(())
}

fn validate_rebuild_config(config: &RebuildConfig) -> Result<()> {
    if config.workers == 0 {
        return Err(invalid("Rebuild pool needs at least one worker"));
    }
    if config.queue_capacity == 0 {
        return Err(invalid("Rebuild queue capacity cannot be 0"));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set store configuration
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set lock configuration
    pub fn with_lock(mut self, lock: LockConfig) -> Self {
        self.config.lock = lock;
        self
    }

    /// Set id generator configuration
    pub fn with_id(mut self, id: IdConfig) -> Self {
        self.config.id = id;
        self
    }

    /// Set rebuild pool configuration
    pub fn with_rebuild(mut self, rebuild: RebuildConfig) -> Self {
        self.config.rebuild = rebuild;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}
