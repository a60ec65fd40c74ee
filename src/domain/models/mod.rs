//! Domain models: builder states, build records, colors and configuration

pub mod builder;
pub mod color;
pub mod config;

pub use builder::{latest_build_id, BuildDetail, BuildId, BuildStep, BuilderState, JobOutcome};
pub use color::{ColorKey, ColorTable, LightColor};
pub use config::{
    BuildmasterConfig, ClassifierConfig, Config, HueConfig, LogFormat, LoggingConfig,
    PollerConfig, RotationPolicy,
};
