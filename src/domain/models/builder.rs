use serde::{Deserialize, Serialize};
use std::fmt;

/// Build number assigned by the build master.
pub type BuildId = u64;

/// Activity state of the watched builder.
///
/// `Unknown` is the cached value before the first successful poll and the
/// value recorded for any cycle whose fetch failed or returned a state token
/// the poller does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderState {
    /// No build is running.
    Idle,
    /// A build is in progress.
    Building,
    /// State could not be determined.
    #[default]
    Unknown,
}

impl BuilderState {
    /// Parse the state token reported by the build master.
    ///
    /// Tokens other than `idle` and `building` (for example `offline`) map to
    /// [`BuilderState::Unknown`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "idle" => Self::Idle,
            "building" => Self::Building,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Building => write!(f, "building"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Terminal outcome of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    /// A compile step failed.
    CompileFailed,
    /// A test step failed.
    TestFailed,
    /// The build failed but no step matched a known failure signature.
    UnknownFailed,
    /// The build passed.
    Success,
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompileFailed => write!(f, "compile_failed"),
            Self::TestFailed => write!(f, "test_failed"),
            Self::UnknownFailed => write!(f, "unknown_failed"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// One step of a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    /// Step name, e.g. `make_package_compile`
    #[serde(default)]
    pub name: String,

    /// Descriptive tags, e.g. `["compile", "failed"]`
    #[serde(default)]
    pub text: Vec<String>,
}

impl BuildStep {
    /// Create a step from a name and its tags
    pub fn new(name: impl Into<String>, text: &[&str]) -> Self {
        Self {
            name: name.into(),
            text: text.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Whether every one of `tags` is present on this step
    pub fn has_tags(&self, tags: &[&str]) -> bool {
        tags.iter().all(|tag| self.text.iter().any(|t| t == tag))
    }
}

/// Detail record of a single build: overall tags plus its steps in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDetail {
    /// Build number, when the build master reports it
    #[serde(default)]
    pub number: Option<BuildId>,

    /// Overall descriptive tags, e.g. `["failed", "compile"]` or `["build", "successful"]`
    #[serde(default)]
    pub text: Vec<String>,

    /// Steps in the order the build master supplied them
    #[serde(default)]
    pub steps: Vec<BuildStep>,
}

impl BuildDetail {
    /// Whether the overall tag list contains `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.text.iter().any(|t| t == tag)
    }
}

/// Select the most recent build from a set of identifiers.
///
/// Identifiers are unique, so the numerically highest is the latest.
pub fn latest_build_id(ids: &[BuildId]) -> Option<BuildId> {
    ids.iter().copied().max()
}
