//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup and handed to every request: server config,
//! XUMM secrets, return URLs, and the payload provider.

use pay_core::{BoxedPayloadProvider, ReturnUrls};
use pay_xumm::{XummConfig, XummPayloadClient};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public hostname of this deployment, used for the wallet's web return URL
    pub public_host: Option<String>,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// `PUBLIC_HOST` wins over `VERCEL_URL`; both are optional.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let public_host = lookup("PUBLIC_HOST")
            .or_else(|| lookup("VERCEL_URL"))
            .filter(|h| !h.trim().is_empty());

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_host,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Return URLs derived from the public host
    pub fn return_urls(&self) -> ReturnUrls {
        ReturnUrls::for_public_host(self.public_host.as_deref())
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payload provider
    pub provider: BoxedPayloadProvider,
    /// XUMM secrets (may be incomplete; checked per request)
    pub xumm: XummConfig,
    /// Wallet return URLs
    pub return_urls: ReturnUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the XUMM platform API
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let xumm = XummConfig::from_env();

        let client = XummPayloadClient::new(&xumm)
            .map_err(|e| anyhow::anyhow!("Failed to initialize XUMM client: {}", e))?;

        Ok(Self::with_provider(config, xumm, Arc::new(client)))
    }

    /// Create state around any provider (tests inject fakes here)
    pub fn with_provider(
        config: AppConfig,
        xumm: XummConfig,
        provider: BoxedPayloadProvider,
    ) -> Self {
        let return_urls = config.return_urls();

        Self {
            provider,
            xumm,
            return_urls,
            config,
        }
    }
}
