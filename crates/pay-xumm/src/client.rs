//! # XUMM Payload Client
//!
//! Implementation of the XUMM platform "create payload" REST call.
//! This is the production `PayloadProvider` for xaman-qr-pay.

use crate::config::XummConfig;
use async_trait::async_trait;
use pay_core::{
    CreatedPayload, PayloadProvider, PayloadRequest, PaymentError, PaymentResult,
    ProviderCredentials,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Path of the payload creation endpoint
pub const CREATE_PAYLOAD_PATH: &str = "/api/v1/platform/payload";

/// XUMM platform API client
///
/// Credentials are passed per call so that a missing secret can be reported
/// by the handler instead of failing at startup.
pub struct XummPayloadClient {
    api_base_url: String,
    client: Client,
}

impl XummPayloadClient {
    /// Create a new client against `config.api_base_url`
    pub fn new(config: &XummConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_base_url: config.api_base_url.clone(),
            client,
        })
    }

    fn payload_url(&self) -> String {
        format!("{}{}", self.api_base_url, CREATE_PAYLOAD_PATH)
    }
}

#[async_trait]
impl PayloadProvider for XummPayloadClient {
    #[instrument(skip(self, credentials, request), fields(destination = %request.txjson.destination))]
    async fn create_payload(
        &self,
        credentials: &ProviderCredentials,
        request: &PayloadRequest,
    ) -> PaymentResult<CreatedPayload> {
        debug!(
            "Creating XUMM payload: type={}, amount={} drops",
            request.txjson.transaction_type, request.txjson.amount
        );

        let response = self
            .client
            .post(self.payload_url())
            .header("X-API-Key", &credentials.api_key)
            .header("X-API-Secret", &credentials.api_secret)
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::ProviderCall(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::ProviderCall(e.to_string()))?;

        if !status.is_success() {
            error!("XUMM API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<XummErrorResponse>(&body) {
                return Err(PaymentError::ProviderCall(error_response.error.to_string()));
            }

            return Err(PaymentError::ProviderCall(format!("HTTP {}: {}", status, body)));
        }

        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|_| {
            PaymentError::ProviderResponse {
                raw: serde_json::Value::String(body.clone()),
            }
        })?;

        let payload = CreatedPayload::from_value(raw);

        info!(
            "Created XUMM payload: uuid={}",
            payload.uuid.as_deref().unwrap_or("<missing>")
        );

        Ok(payload)
    }

    fn provider_name(&self) -> &'static str {
        "xumm"
    }
}

// =============================================================================
// XUMM API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct XummErrorResponse {
    error: XummError,
}

#[derive(Debug, Deserialize)]
struct XummError {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

impl std::fmt::Display for XummError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "XUMM error code {}, reference '{}'",
            self.code.map(|c| c.to_string()).unwrap_or_else(|| "unknown".to_string()),
            self.reference.as_deref().unwrap_or("none")
        )
    }
}
