//! Buildbot JSON status API client
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::BuilderResponse;
use crate::domain::error::ProviderError;
use crate::domain::models::{BuildDetail, BuildId, BuilderState, BuildmasterConfig};
use crate::domain::ports::BuildStatusProvider;

/// Configuration for the Buildbot client
#[derive(Debug, Clone)]
pub struct BuildbotClientConfig {
    /// Base URL of the web status, e.g. `https://ci.example.com/buildbot`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BuildbotClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8010".to_string(),
            timeout_secs: 10,
        }
    }
}

impl From<&BuildmasterConfig> for BuildbotClientConfig {
    fn from(config: &BuildmasterConfig) -> Self {
        Self {
            base_url: config.address.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// [`BuildStatusProvider`] backed by the Buildbot `/json` status API
pub struct BuildbotClient {
    /// Reusable HTTP client with connection pooling
    http_client: ReqwestClient,

    /// Base URL of the web status
    base_url: Url,
}

impl BuildbotClient {
    /// Create a client with custom configuration
    ///
    /// # Returns
    /// * `Err(anyhow::Error)` - Base URL unparseable or HTTP client could not be built
    pub fn with_config(config: BuildbotClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid build master address: {}", config.base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid build master address: {}", config.base_url);
        }

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// `{base}/json/builders/{builder}[/builds/{id}]`, segments percent-encoded
    fn builder_url(&self, builder: &str, build_id: Option<BuildId>) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ProviderError::InvalidEndpoint(self.base_url.to_string())
            })?;
            segments.pop_if_empty().extend(["json", "builders", builder]);
            if let Some(id) = build_id {
                let id = id.to_string();
                segments.extend(["builds", id.as_str()]);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        debug!(%url, "fetching build master resource");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(ProviderError::from_status(status, body));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn builder(&self, job: &str) -> Result<BuilderResponse, ProviderError> {
        let url = self.builder_url(job, None)?;
        self.get_json(url).await
    }
}

#[async_trait]
impl BuildStatusProvider for BuildbotClient {
    async fn builder_state(&self, job: &str) -> Result<BuilderState, ProviderError> {
        let response = self.builder(job).await?;
        Ok(BuilderState::from_token(&response.state))
    }

    async fn build_ids(&self, job: &str) -> Result<Vec<BuildId>, ProviderError> {
        Ok(self.builder(job).await?.cached_builds)
    }

    async fn build_detail(
        &self,
        job: &str,
        build_id: BuildId,
    ) -> Result<BuildDetail, ProviderError> {
        let url = self.builder_url(job, Some(build_id))?;
        self.get_json(url).await
    }
}
