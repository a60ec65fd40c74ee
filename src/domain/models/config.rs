use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use super::color::ColorTable;

/// Main configuration structure for Buildlight
///
/// Section and key names follow the JSON layout of the configuration file:
///
/// ```json
/// {
///   "poller": { "interval_in_sec": 4 },
///   "hue": { "address": "192.168.1.20", "user": "newdeveloper", "light_name": "build" },
///   "buildmaster": { "address": "https://ci.example.com/buildbot", "builder": "nightly" },
///   "color_state_matcher": { "building": "RED", "success": "GREEN" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Poll loop configuration
    #[serde(default)]
    pub poller: PollerConfig,

    /// Hue bridge configuration
    #[serde(default)]
    pub hue: HueConfig,

    /// Build master configuration
    #[serde(default)]
    pub buildmaster: BuildmasterConfig,

    /// Color shown for each build status
    ///
    /// Not serialized into the layered defaults: the table's own field
    /// defaults apply, so `compile_failed` never collides with a seeded
    /// `build_failed`.
    #[serde(default, skip_serializing)]
    pub color_state_matcher: ColorTable,

    /// Failure classification tags
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Poll loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollerConfig {
    /// Seconds to sleep between polls
    #[serde(default = "default_interval_in_sec")]
    pub interval_in_sec: u64,
}

const fn default_interval_in_sec() -> u64 {
    4
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_in_sec: default_interval_in_sec(),
        }
    }
}

/// Hue bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HueConfig {
    /// Bridge host or `http://host:port` base URL (required)
    #[serde(default)]
    pub address: String,

    /// Whitelisted bridge user name (required)
    #[serde(default, deserialize_with = "string_or_number")]
    pub user: String,

    /// Name of the light to drive (required)
    #[serde(default, deserialize_with = "string_or_number")]
    pub light_name: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            user: String::new(),
            light_name: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Build master configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildmasterConfig {
    /// Base URL of the build master web status (required)
    #[serde(default)]
    pub address: String,

    /// Builder to watch (required)
    #[serde(default, deserialize_with = "string_or_number")]
    pub builder: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BuildmasterConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            builder: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    10
}

/// Read a name that may arrive as a scalar of another type.
///
/// Environment overrides are typed before deserialization, so
/// `BUILDLIGHT_HUE__LIGHT_NAME=3` arrives as an integer. Such values are
/// re-rendered from the parsed scalar; leading zeros do not survive.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

/// Tags used to attribute a failed build to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassifierConfig {
    /// Tag marking a compile step
    #[serde(default = "default_compile_tag")]
    pub compile_tag: String,

    /// Tags marking a test step
    #[serde(default = "default_test_tags")]
    pub test_tags: Vec<String>,
}

fn default_compile_tag() -> String {
    "compile".to_string()
}

fn default_test_tags() -> Vec<String> {
    vec!["python".to_string()]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            compile_tag: default_compile_tag(),
            test_tags: default_test_tags(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Stdout format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling log files (stdout only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Stdout log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable output
    #[default]
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// Single file
    Never,
}
