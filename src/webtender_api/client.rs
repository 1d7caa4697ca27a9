use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Request, Url};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::core::{ClientConfig, Error, Result, Transport};
use crate::signer::HmacSigner;
use crate::webtender_api::model::ApiResponse;
use crate::webtender_api::transport::ReqwestTransport;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Join `base` and `path` with exactly one `/` between them.
///
/// Only a single trailing slash of `base` and a single leading slash of
/// `path` are removed.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", base, path)
}

/// Signed client for the Webtender API.
///
/// Holds no per-call state; share it behind an `Arc` or clone it freely.
#[derive(Clone)]
pub struct WebtenderClient {
    transport: Arc<dyn Transport>,
    signer: HmacSigner,
    base_url: String,
}

impl std::fmt::Debug for WebtenderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebtenderClient")
            .field("signer", &self.signer)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WebtenderClient {
    /// Client backed by `reqwest` using the configured timeout (30 s when zero).
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.effective_timeout())
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Credentials and base URL taken from `WEBTENDER_API_*` / `.env`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            signer: HmacSigner::new(config.api_key, config.api_secret),
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Request construction ─────────────────────────────────────────────

    /// Build and sign a request for `path` relative to the base URL.
    pub fn build_request(&self, method: Method, path: &str, body: Vec<u8>) -> Result<Request> {
        let raw_url = join_url(&self.base_url, path);
        let url = Url::parse(&raw_url)
            .map_err(|e| Error::RequestConstruction(format!("invalid URL {:?}: {}", raw_url, e)))?;

        let mut request = Request::new(method, url);
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !body.is_empty() {
            *request.body_mut() = Some(body.into());
        }

        self.sign_request(&mut request)?;
        Ok(request)
    }

    pub fn get_request(&self, path: &str) -> Result<Request> {
        self.build_request(Method::GET, path, Vec::new())
    }

    pub fn post_request(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<Request> {
        self.build_request(Method::POST, path, body.into())
    }

    pub fn patch_request(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<Request> {
        self.build_request(Method::PATCH, path, body.into())
    }

    pub fn put_request(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<Request> {
        self.build_request(Method::PUT, path, body.into())
    }

    pub fn delete_request(&self, path: &str) -> Result<Request> {
        self.build_request(Method::DELETE, path, Vec::new())
    }

    // ── Signing ──────────────────────────────────────────────────────────

    /// Stamp `X-API-Key`, `X-Timestamp` and `X-Signature` onto `request`.
    ///
    /// The timestamp is taken here, and the signature covers the URL exactly
    /// as the request will be dispatched. On error no header is touched.
    pub fn sign_request(&self, request: &mut Request) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let body: &[u8] = match request.body() {
            None => &[],
            Some(body) => body
                .as_bytes()
                .ok_or_else(|| Error::BodyRead("streaming body cannot be signed".to_string()))?,
        };

        let signature = self.signer.sign(
            request.method().as_str(),
            request.url().as_str(),
            body,
            &timestamp,
        );
        trace!(method = %request.method(), url = %request.url(), %timestamp, "signed request");

        let api_key = HeaderValue::from_str(self.signer.key_id())
            .map_err(|e| Error::Signing(format!("API key is not a valid header value: {}", e)))?;
        let timestamp = HeaderValue::from_str(&timestamp).map_err(|e| Error::Signing(e.to_string()))?;
        let signature = HeaderValue::from_str(&signature).map_err(|e| Error::Signing(e.to_string()))?;

        let headers = request.headers_mut();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(TIMESTAMP_HEADER, timestamp);
        headers.insert(SIGNATURE_HEADER, signature);

        Ok(())
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// Send a prepared request and normalize the response.
    pub async fn execute(&self, request: Request) -> Result<ApiResponse> {
        debug!(method = %request.method(), url = %request.url(), "dispatching request");

        let response = self.transport.execute(request).await?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| Error::ResponseBody { status, source })?;

        debug!(status, bytes = body.len(), "response received");
        normalize(status, &body)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let request = self.get_request(path)?;
        self.execute(request).await
    }

    pub async fn post(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<ApiResponse> {
        let request = self.post_request(path, body)?;
        self.execute(request).await
    }

    pub async fn patch(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<ApiResponse> {
        let request = self.patch_request(path, body)?;
        self.execute(request).await
    }

    pub async fn put(&self, path: &str, body: impl Into<Vec<u8>>) -> Result<ApiResponse> {
        let request = self.put_request(path, body)?;
        self.execute(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        let request = self.delete_request(path)?;
        self.execute(request).await
    }
}

/// Decode a raw body and classify the status code.
pub fn normalize(status: u16, body: &[u8]) -> Result<ApiResponse> {
    let mut response = ApiResponse::new(status);
    response.data = serde_json::from_slice(body).map_err(|source| Error::Decode { status, source })?;

    if !response.is_success() {
        let message = response.error_message();
        return Err(Error::Status { response, message });
    }

    Ok(response)
}
