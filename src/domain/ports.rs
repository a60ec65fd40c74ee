use async_trait::async_trait;

use super::error::{LightError, ProviderError};
use super::models::{BuildDetail, BuildId, BuilderState, LightColor};

/// Source of builder state and build records
///
/// Implementations talk to a CI build master; the poller only ever calls
/// these methods sequentially.
#[async_trait]
pub trait BuildStatusProvider: Send + Sync {
    /// Current activity state of the builder
    ///
    /// Unrecognized state tokens are reported as [`BuilderState::Unknown`],
    /// not as an error.
    async fn builder_state(&self, job: &str) -> Result<BuilderState, ProviderError>;

    /// Identifiers of the builds the build master still has on record
    async fn build_ids(&self, job: &str) -> Result<Vec<BuildId>, ProviderError>;

    /// Detail record of one build
    ///
    /// # Arguments
    /// * `job` - Builder name
    /// * `build_id` - Build number, usually the highest of [`Self::build_ids`]
    async fn build_detail(&self, job: &str, build_id: BuildId)
        -> Result<BuildDetail, ProviderError>;
}

/// A named light that can be set to one of the supported colors
#[async_trait]
pub trait LightController: Send + Sync {
    /// Switch the light on and set it to `color`
    async fn set_light_color(&self, light: &str, color: LightColor) -> Result<(), LightError>;

    /// Colors this controller can show, in listing order
    fn supported_colors(&self) -> Vec<LightColor>;
}
