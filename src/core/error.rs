//! Error handling - one flat error type for the whole client

use thiserror::Error;

use crate::webtender_api::model::ApiResponse;

pub type Result<T> = std::result::Result<T, Error>;

/// Webtender client error hierarchy
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid credentials / base URL
    #[error("Configuration error: {0}")]
    Config(String),

    /// Method or URL rejected while building the request
    #[error("Failed to create request: {0}")]
    RequestConstruction(String),

    /// Auth headers could not be attached
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// Request body not available as bytes
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// Connection, TLS, DNS or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response arrived but its body could not be read
    #[error("Failed to read response body (status {status}): {source}")]
    ResponseBody {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not JSON
    #[error("Failed to decode response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Server answered with status > 299
    #[error("{message}")]
    Status {
        response: ApiResponse,
        message: String,
    },
}

impl Error {
    /// HTTP status observed before the failure, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ResponseBody { status, .. } | Error::Decode { status, .. } => Some(*status),
            Error::Status { response, .. } => Some(response.status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Decoded payload of a logical failure.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Error::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
