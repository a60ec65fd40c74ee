//! Buildlight - build health on a smart light
//!
//! Buildlight polls one builder on a Buildbot build master and mirrors its
//! state onto one Philips Hue light: a color while building, and a color per
//! outcome (success, compile failure, test failure, unknown failure) once the
//! builder goes idle again.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): builder states, outcomes, colors and the ports
//! - **Service Layer** (`services`): outcome classification, color mapping, poll loop
//! - **Infrastructure Layer** (`infrastructure`): config, logging, HTTP clients, signals
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use buildlight::services::{color_for, OutcomeClassifier};
//! use buildlight::domain::models::{BuildDetail, ColorTable};
//!
//! let outcome = OutcomeClassifier::default().classify(&BuildDetail::default());
//! let color = color_for(outcome, &ColorTable::default());
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    BuildDetail, BuildId, BuildStep, BuilderState, ColorKey, ColorTable, Config, JobOutcome,
    LightColor,
};
pub use domain::ports::{BuildStatusProvider, LightController};
pub use domain::{LightError, ProviderError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ColorMapper, OutcomeClassifier, PollOutcome, PollerSettings, StatusPoller};
