//! Philips Hue bridge client (REST API v1)
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response, Url};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::types::{first_error, BridgeResponse, LightInfo, LightStateRequest};
use crate::domain::error::LightError;
use crate::domain::models::{HueConfig, LightColor};
use crate::domain::ports::LightController;

/// Configuration for the Hue client
#[derive(Debug, Clone)]
pub struct HueClientConfig {
    /// Bridge host (`192.168.1.20`) or base URL (`http://192.168.1.20:8080`)
    pub address: String,

    /// Whitelisted bridge user name
    pub user: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl From<&HueConfig> for HueClientConfig {
    fn from(config: &HueConfig) -> Self {
        Self {
            address: config.address.clone(),
            user: config.user.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// [`LightController`] driving lights through a Hue bridge
///
/// Light names are resolved to bridge ids on first use and cached; a failed
/// write drops the cached id so the next write resolves it again.
pub struct HueClient {
    /// Reusable HTTP client with connection pooling
    http_client: ReqwestClient,

    /// `{bridge}/api/{user}`
    api_url: Url,

    /// Light name to bridge id
    light_ids: RwLock<HashMap<String, String>>,
}

impl HueClient {
    /// Colors the bridge client can show, in listing order
    pub const SUPPORTED_COLORS: &'static [LightColor] = &LightColor::ALL;

    /// Create a client with custom configuration
    pub fn with_config(config: HueClientConfig) -> Result<Self> {
        let address = config.address.trim().trim_end_matches('/');
        let address = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };

        let mut api_url = Url::parse(&address)
            .with_context(|| format!("Invalid Hue bridge address: {}", config.address))?;
        api_url
            .path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Invalid Hue bridge address: {}", config.address))?
            .pop_if_empty()
            .extend(["api", config.user.as_str()]);

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            api_url,
            light_ids: RwLock::new(HashMap::new()),
        })
    }

    fn lights_url(&self, rest: &[&str]) -> Result<Url, LightError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| LightError::InvalidEndpoint(self.api_url.to_string()))?
            .push("lights")
            .extend(rest);
        Ok(url)
    }

    async fn read_body(response: Response) -> Result<String, LightError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(LightError::from_status(status, body));
        }
        Ok(response.text().await?)
    }

    /// Bridge id of the light called `name`
    ///
    /// When several lights share the name, the lowest id wins.
    pub async fn resolve_light_id(&self, name: &str) -> Result<String, LightError> {
        if let Some(id) = self.light_ids.read().await.get(name) {
            return Ok(id.clone());
        }

        let response = self.http_client.get(self.lights_url(&[])?).send().await?;
        let body = Self::read_body(response).await?;

        // Authorization failures come back as a 200 with an error array
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if value.is_array() {
            let responses: Vec<BridgeResponse> = serde_json::from_value(value)?;
            return Err(first_error(responses)
                .unwrap_or_else(|| LightError::LightNotFound(name.to_string())));
        }

        let lights: HashMap<String, LightInfo> = serde_json::from_value(value)?;
        let id = lights
            .into_iter()
            .filter(|(_, info)| info.name == name)
            .map(|(id, _)| id)
            .min_by_key(|id| (id.parse::<u64>().unwrap_or(u64::MAX), id.clone()))
            .ok_or_else(|| LightError::LightNotFound(name.to_string()))?;

        debug!(light = name, %id, "resolved light id");
        self.light_ids
            .write()
            .await
            .insert(name.to_string(), id.clone());
        Ok(id)
    }

    async fn write_state(&self, id: &str, color: LightColor) -> Result<(), LightError> {
        let url = self.lights_url(&[id, "state"])?;
        let response = self
            .http_client
            .put(url)
            .json(&LightStateRequest::for_color(color))
            .send()
            .await?;
        let body = Self::read_body(response).await?;

        let responses: Vec<BridgeResponse> = serde_json::from_str(&body)?;
        first_error(responses).map_or(Ok(()), Err)
    }
}

#[async_trait]
impl LightController for HueClient {
    async fn set_light_color(&self, light: &str, color: LightColor) -> Result<(), LightError> {
        let id = self.resolve_light_id(light).await?;

        if let Err(err) = self.write_state(&id, color).await {
            self.light_ids.write().await.remove(light);
            return Err(err);
        }

        info!(light, %id, %color, "light color set");
        Ok(())
    }

    fn supported_colors(&self) -> Vec<LightColor> {
        Self::SUPPORTED_COLORS.to_vec()
    }
}
