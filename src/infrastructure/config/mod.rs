//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - JSON or YAML file loading
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_PATH};
