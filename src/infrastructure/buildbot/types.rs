use serde::Deserialize;

use crate::domain::models::BuildId;

/// Builder resource of the Buildbot JSON status API
/// (`GET /json/builders/{builder}`).
///
/// Only the fields the poller reads are modelled; the rest of the payload
/// (`basedir`, `category`, `currentBuilds`, `slaves`, ...) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct BuilderResponse {
    /// `idle`, `building`, `offline`, ...
    pub state: String,

    /// Build numbers still held in the builder's cache
    #[serde(rename = "cachedBuilds", default)]
    pub cached_builds: Vec<BuildId>,
}
