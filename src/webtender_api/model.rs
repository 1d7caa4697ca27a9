use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized result of one request/response cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    /// Decoded JSON payload; any shape the server chose to send
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            data: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status <= 299
    }

    /// `message` member of an object payload, if it is a string.
    pub fn server_message(&self) -> Option<&str> {
        self.data.as_object()?.get("message")?.as_str()
    }

    /// Text used for a logical failure: `status: <code>[: <message>]`.
    pub fn error_message(&self) -> String {
        match self.server_message() {
            Some(message) => format!("status: {}: {}", self.status, message),
            None => format!("status: {}", self.status),
        }
    }
}
