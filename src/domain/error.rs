use thiserror::Error;

/// Errors raised while fetching builder state or build records
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network unreachable, connection reset or timeout
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The build master answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body did not match the expected schema
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Request URL could not be built from the configured address
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ProviderError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        Self::Http {
            status: status.as_u16(),
            body: truncate_body(body),
        }
    }
}

/// Errors raised while driving the light
#[derive(Error, Debug)]
pub enum LightError {
    /// Network unreachable, connection reset or timeout
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The bridge answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// No light with this name is known to the bridge
    #[error("Light not found: {0}")]
    LightNotFound(String),

    /// The bridge accepted the request but reported an error
    #[error("Bridge error {kind} at {address}: {description}")]
    Bridge {
        /// Bridge error type number
        kind: u32,
        /// Resource the error refers to
        address: String,
        /// Bridge-supplied description
        description: String,
    },

    /// Response body did not match the expected schema
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Request URL could not be built from the configured address
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl LightError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        Self::Http {
            status: status.as_u16(),
            body: truncate_body(body),
        }
    }
}

const MAX_BODY_LEN: usize = 512;

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_BODY_LEN {
        let mut cut = MAX_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}
