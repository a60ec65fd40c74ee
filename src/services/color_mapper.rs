//! Mapping from builder states and build outcomes to light colors.

use crate::domain::models::{BuilderState, ColorKey, ColorTable, JobOutcome, LightColor};

/// Anything the poller may want to show on the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Current builder activity
    Builder(BuilderState),
    /// Outcome of the last finished build
    Outcome(JobOutcome),
}

impl From<BuilderState> for Status {
    fn from(state: BuilderState) -> Self {
        Self::Builder(state)
    }
}

impl From<JobOutcome> for Status {
    fn from(outcome: JobOutcome) -> Self {
        Self::Outcome(outcome)
    }
}

impl Status {
    /// Color table key for this status, `None` for states that carry no color
    pub const fn color_key(self) -> Option<ColorKey> {
        match self {
            Self::Builder(BuilderState::Building) => Some(ColorKey::Building),
            Self::Builder(BuilderState::Idle | BuilderState::Unknown) => None,
            Self::Outcome(JobOutcome::Success) => Some(ColorKey::Success),
            Self::Outcome(JobOutcome::CompileFailed) => Some(ColorKey::CompileFailed),
            Self::Outcome(JobOutcome::TestFailed) => Some(ColorKey::TestFailed),
            Self::Outcome(JobOutcome::UnknownFailed) => Some(ColorKey::UnknownFailed),
        }
    }
}

/// Color to display for `status`, or `None` when the status carries no color.
pub fn color_for(status: impl Into<Status>, table: &ColorTable) -> Option<LightColor> {
    status.into().color_key().map(|key| table.get(key))
}

/// [`color_for`] bound to a configured table.
#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    table: ColorTable,
}

impl ColorMapper {
    /// Create a mapper over `table`
    pub const fn new(table: ColorTable) -> Self {
        Self { table }
    }

    /// Color to display for `status`
    pub fn color_for(&self, status: impl Into<Status>) -> Option<LightColor> {
        color_for(status, &self.table)
    }

    /// The underlying table
    pub const fn table(&self) -> &ColorTable {
        &self.table
    }
}
