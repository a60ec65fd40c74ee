//! Service layer: classification, color mapping and the poll loop.

pub mod color_mapper;
pub mod outcome_classifier;
pub mod status_poller;

pub use color_mapper::{color_for, ColorMapper, Status};
pub use outcome_classifier::OutcomeClassifier;
pub use status_poller::{PollOutcome, PollerSettings, StatusPoller};
