//! Webtender API - Client Library
//! HMAC-signed requests and normalized JSON responses

// Public modules
pub mod core;
pub mod signer;
pub mod webtender_api;

// Re-exports
pub use self::core::{ClientConfig, Error, Result, Transport};
pub use self::webtender_api::{ApiResponse, ReqwestTransport, WebtenderClient};
