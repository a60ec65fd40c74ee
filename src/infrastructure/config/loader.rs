use anyhow::{Context, Result};
use figment::providers::{Env, Format, Json, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::domain::models::config::Config;
use crate::infrastructure::logging::parse_log_level;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Prefix of environment variable overrides (`BUILDLIGHT_HUE__ADDRESS`, ...)
pub const ENV_PREFIX: &str = "BUILDLIGHT_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Missing required configuration value: {0}")]
    MissingField(&'static str),

    #[error("Invalid interval_in_sec: {0}. Must be at least 1")]
    InvalidInterval(u64),

    #[error("Invalid {0}: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`]
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized; the color table is filled by its
    ///    own field defaults instead)
    /// 2. The configuration file (`.json` is read as JSON, anything else as YAML)
    /// 3. Environment variables (`BUILDLIGHT_*` prefix, `__` separates sections)
    ///
    /// The merged result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf);
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path).into());
        }

        let config: Config = Self::figment(&path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
        }

        let config: Config = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Yaml::file(path))
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Endpoints and names have no sensible default
        let required = [
            ("hue.address", &config.hue.address),
            ("hue.user", &config.hue.user),
            ("hue.light_name", &config.hue.light_name),
            ("buildmaster.address", &config.buildmaster.address),
            ("buildmaster.builder", &config.buildmaster.builder),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field));
            }
        }

        if config.poller.interval_in_sec == 0 {
            return Err(ConfigError::InvalidInterval(config.poller.interval_in_sec));
        }

        if config.hue.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("hue.timeout_secs"));
        }

        if config.buildmaster.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("buildmaster.timeout_secs"));
        }

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.classifier.compile_tag.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "classifier.compile_tag cannot be empty".to_string(),
            ));
        }

        if config.classifier.test_tags.is_empty()
            || config.classifier.test_tags.iter().any(|t| t.trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed(
                "classifier.test_tags must list at least one non-empty tag".to_string(),
            ));
        }

        Ok(())
    }

    /// Log the effective configuration, one line per setting.
    ///
    /// The bridge user is a credential and is redacted.
    pub fn log_effective(config: &Config) {
        info!("current configuration");
        info!(" * poller.interval_in_sec: {}", config.poller.interval_in_sec);
        info!(" * hue.address: {}", config.hue.address);
        info!(" * hue.user: {}", redact(&config.hue.user));
        info!(" * hue.light_name: {}", config.hue.light_name);
        info!(" * buildmaster.address: {}", config.buildmaster.address);
        info!(" * buildmaster.builder: {}", config.buildmaster.builder);

        let colors = &config.color_state_matcher;
        info!(" * color.building: {}", colors.building);
        info!(" * color.success: {}", colors.success);
        info!(" * color.build_failed: {}", colors.build_failed);
        info!(" * color.test_failed: {}", colors.test_failed);
        info!(" * color.unknown_failed: {}", colors.unknown_failed);
    }
}

/// Keep the first four characters of a secret and mask the rest
pub fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "[REDACTED]".to_string()
    } else {
        format!("{visible}...[REDACTED]")
    }
}
