use serde::{Deserialize, Serialize};

use crate::domain::error::LightError;
use crate::domain::models::LightColor;

/// Light resource as listed by `GET /api/{user}/lights`.
#[derive(Debug, Clone, Deserialize)]
pub struct LightInfo {
    /// User-assigned light name
    pub name: String,
}

/// Body of `PUT /api/{user}/lights/{id}/state`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightStateRequest {
    /// Switch the light on
    pub on: bool,
    /// Brightness, 1..=254
    pub bri: u8,
    /// CIE 1931 chromaticity
    pub xy: [f32; 2],
}

impl LightStateRequest {
    /// Full-brightness request for `color`
    pub const fn for_color(color: LightColor) -> Self {
        Self {
            on: true,
            bri: 254,
            xy: color.xy(),
        }
    }
}

/// One entry of the array the bridge returns for writes and failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeResponse {
    /// Present when the entry reports success
    #[serde(default)]
    pub success: Option<serde_json::Value>,
    /// Present when the entry reports an error
    #[serde(default)]
    pub error: Option<BridgeErrorBody>,
}

/// Error entry reported by the bridge.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeErrorBody {
    /// Bridge error type number (1 = unauthorized user, 3 = resource not available, ...)
    #[serde(rename = "type")]
    pub kind: u32,
    /// Resource the error refers to
    #[serde(default)]
    pub address: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl From<BridgeErrorBody> for LightError {
    fn from(body: BridgeErrorBody) -> Self {
        Self::Bridge {
            kind: body.kind,
            address: body.address,
            description: body.description,
        }
    }
}

/// First error entry of a bridge response array, if any.
pub fn first_error(responses: Vec<BridgeResponse>) -> Option<LightError> {
    responses
        .into_iter()
        .find_map(|entry| entry.error)
        .map(LightError::from)
}
