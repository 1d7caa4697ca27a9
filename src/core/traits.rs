//! Transport abstraction - the client never talks to the network directly

use async_trait::async_trait;

use crate::core::Result;

/// HTTP transport the client dispatches signed requests through.
///
/// Implementations own connection pooling, TLS, redirects and the timeout.
/// A failure to obtain a response at all must surface as `Error::Transport`;
/// any status code, including 4xx/5xx, is a successful transport call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request, no retries.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}
