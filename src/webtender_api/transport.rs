use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::time::Duration;

use crate::core::{Result, Transport};

/// Default transport: a pooled `reqwest::Client` with a whole-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Wrap an existing client (custom TLS, proxies, ...).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        Ok(self.client.execute(request).await?)
    }
}
