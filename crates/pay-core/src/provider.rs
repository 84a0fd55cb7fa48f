//! # Payload Provider Trait
//!
//! Narrow seam between the HTTP handler and the service that creates
//! signable payloads. The production implementation talks to the XUMM
//! platform API; tests substitute an in-memory fake.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PayloadProvider (trait)                    │
//! │  ├── create_payload()                                       │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!               ┌────────────┴────────────┐
//!       ┌───────┴────────┐        ┌───────┴───────┐
//!       │XummPayloadClient│        │  test fakes   │
//!       └────────────────┘        └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::payload::{CreatedPayload, PayloadRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Web return URL used when no public host is configured
pub const LOCAL_WEB_RETURN_URL: &str = "http://localhost:3000";

/// Custom scheme that brings the user back into the wallet app
pub const APP_RETURN_URL: &str = "xaman://";

/// API key pair that authenticates calls to the provider
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ProviderCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Service that turns a transaction descriptor into a signable payload.
#[async_trait]
pub trait PayloadProvider: Send + Sync {
    /// Create a payload.
    ///
    /// # Arguments
    /// * `credentials` - API key pair for the provider
    /// * `request` - Transaction descriptor and return URLs
    ///
    /// # Returns
    /// The provider's reply, unchecked. Transport and provider-side failures
    /// come back as `PaymentError::ProviderCall`.
    async fn create_payload(
        &self,
        credentials: &ProviderCredentials,
        request: &PayloadRequest,
    ) -> PaymentResult<CreatedPayload>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedPayloadProvider = Arc<dyn PayloadProvider>;

/// Where the wallet sends the user after signing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnUrls {
    /// Browser return URL (e.g., "https://my-app.vercel.app")
    pub web: String,
    /// In-app return deep link
    pub app: String,
}

impl ReturnUrls {
    pub fn new(web: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            web: web.into(),
            app: app.into(),
        }
    }

    /// Build the pair from the deployment's public hostname.
    ///
    /// A bare hostname gets `https://`; no hostname falls back to localhost.
    pub fn for_public_host(public_host: Option<&str>) -> Self {
        let web = match public_host.map(str::trim).filter(|h| !h.is_empty()) {
            Some(host) if host.starts_with("http://") || host.starts_with("https://") => {
                host.trim_end_matches('/').to_string()
            }
            Some(host) => format!("https://{}", host.trim_end_matches('/')),
            None => LOCAL_WEB_RETURN_URL.to_string(),
        };

        Self::new(web, APP_RETURN_URL)
    }
}

impl Default for ReturnUrls {
    fn default() -> Self {
        Self::for_public_host(None)
    }
}
