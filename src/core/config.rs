//! Configuration - validated once, immutable afterwards
//!
//! Values given explicitly win. Empty fields are filled from the environment
//! (`.env` is honoured) and finally from built-in defaults.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::core::{Error, Result};

pub const ENV_BASE_URL: &str = "WEBTENDER_API_BASE_URL";
pub const ENV_API_KEY: &str = "WEBTENDER_API_KEY";
pub const ENV_API_SECRET: &str = "WEBTENDER_API_SECRET";
pub const ENV_TIMEOUT_SECS: &str = "WEBTENDER_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.webtender.host/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
/// `Default` is the all-empty config that `with_env_fallbacks` fills in.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    /// Only ever used as the HMAC key
    pub api_secret: String,
    /// Trailing slash optional
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// On-disk layout of a TOML config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    api_secret: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout handed to the transport; zero means the default.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Everything from the environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_fallbacks()
    }

    /// Load from a TOML file; missing keys fall back to the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)?.with_env_fallbacks()
    }

    fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(Self {
            api_key: file.api_key.unwrap_or_default(),
            api_secret: file.api_secret.unwrap_or_default(),
            base_url: file.base_url.unwrap_or_default(),
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(0)),
        })
    }

    /// Fill empty fields from the process environment, then validate.
    pub fn with_env_fallbacks(self) -> Result<Self> {
        dotenv::dotenv().ok();
        self.fill_from(|name| std::env::var(name).ok())
    }

    fn fill_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if self.base_url.is_empty() {
            self.base_url = get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        }
        if self.api_key.is_empty() {
            self.api_key = get(ENV_API_KEY).unwrap_or_default();
        }
        if self.api_secret.is_empty() {
            self.api_secret = get(ENV_API_SECRET).unwrap_or_default();
        }
        if self.timeout.is_zero() {
            self.timeout = match get(ENV_TIMEOUT_SECS) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| Error::Config(format!("{} is not a number: {}", ENV_TIMEOUT_SECS, e)))?,
                None => DEFAULT_TIMEOUT,
            };
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject configs the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config(format!("{} is required", ENV_API_KEY)));
        }
        if self.api_secret.is_empty() {
            return Err(Error::Config(format!("{} is required", ENV_API_SECRET)));
        }
        if self.base_url.is_empty() {
            return Err(Error::Config(format!("{} is required", ENV_BASE_URL)));
        }

        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {:?}: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("Base URL {:?} cannot be joined with a path", self.base_url)));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!("Base URL {:?} must be http or https", self.base_url)));
        }

        Ok(())
    }
}
