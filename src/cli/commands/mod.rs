//! CLI command implementations.

pub mod colors;
pub mod run;
