//! # XUMM Configuration
//!
//! Configuration management for the XUMM platform integration.
//! Secrets are loaded from environment variables once at startup; a missing
//! secret is only reported when a request actually needs it.

use pay_core::{PaymentError, PaymentResult, ProviderCredentials};
use std::env;
use std::fmt;

/// Default XUMM platform API host
pub const DEFAULT_API_BASE_URL: &str = "https://xumm.app";

/// XUMM API configuration
#[derive(Clone)]
pub struct XummConfig {
    /// Application API key (`XUMM_API_KEY`)
    pub api_key: Option<String>,

    /// Application API secret (`XUMM_API_SECRET`)
    api_secret: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl XummConfig {
    /// Load configuration from environment variables.
    ///
    /// Env vars:
    /// - `XUMM_API_KEY` (required at request time)
    /// - `XUMM_API_SECRET` (required at request time)
    /// - `XUMM_API_BASE_URL` (optional, defaults to `https://xumm.app`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("XUMM_API_KEY"),
            api_secret: non_empty("XUMM_API_SECRET"),
            api_base_url: non_empty("XUMM_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Config with no secrets at all
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Check whether both secrets are present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// Credentials for a provider call, or a configuration error naming
    /// the missing variable(s).
    pub fn credentials(&self) -> PaymentResult<ProviderCredentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Ok(ProviderCredentials::new(key, secret)),
            (None, Some(_)) => Err(PaymentError::Configuration(
                "XUMM_API_KEY not set".to_string(),
            )),
            (Some(_), None) => Err(PaymentError::Configuration(
                "XUMM_API_SECRET not set".to_string(),
            )),
            (None, None) => Err(PaymentError::Configuration(
                "XUMM_API_KEY and XUMM_API_SECRET not set".to_string(),
            )),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: drop the API secret (for testing)
    pub fn without_api_secret(mut self) -> Self {
        self.api_secret = None;
        self
    }
}

impl fmt::Debug for XummConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XummConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
