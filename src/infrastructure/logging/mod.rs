//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Human-readable or JSON console output
//! - Optional rolling JSON log files

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};
