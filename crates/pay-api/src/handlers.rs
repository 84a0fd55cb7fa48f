//! # Request Handlers
//!
//! Axum request handlers for the payment request API.
//! The payment handler runs one linear pass: method → secrets → input →
//! provider call → response mapping. Nothing is retried.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use pay_core::{
    PayloadRequest, PaymentError, PaymentRequestInput, PaymentRequestResult, PaymentResult,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = ErrorResponse::new(err.public_message());
    if let Some(detail) = err.detail() {
        response = response.with_error(detail);
    }

    (status, Json(response))
}

/// Log an error at the level it deserves before it is turned into a response
fn log_payment_error(err: &PaymentError) {
    match err {
        PaymentError::MethodNotAllowed => debug!("Rejected non-POST request"),
        PaymentError::InvalidRequest(message) => info!("Rejected payment request: {}", message),
        PaymentError::Configuration(message) => {
            error!("XUMM API key or secret not configured: {}", message)
        }
        PaymentError::ProviderResponse { raw } => {
            error!(raw = %raw, "XUMM payload creation failed or missing data")
        }
        PaymentError::ProviderCall(message) => {
            error!("Error creating XUMM payment payload: {}", message)
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "xaman-qr-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a XUMM payment payload and return its QR code and deep link.
///
/// Mounted for every method so that non-POST requests get a JSON 405.
#[instrument(skip(state, method, body), fields(method = %method, body_len = body.len()))]
pub async fn create_xumm_payment(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<PaymentRequestResult>, (StatusCode, Json<ErrorResponse>)> {
    create_payment_internal(&state, &method, &body)
        .await
        .map(Json)
        .map_err(|e| {
            log_payment_error(&e);
            payment_error_to_response(e)
        })
}

/// Internal payment request flow (shared logic)
async fn create_payment_internal(
    state: &AppState,
    method: &Method,
    body: &[u8],
) -> PaymentResult<PaymentRequestResult> {
    if *method != Method::POST {
        return Err(PaymentError::MethodNotAllowed);
    }

    // Secrets are checked before the body so a misconfigured deployment
    // never reaches the provider.
    let credentials = state.xumm.credentials()?;

    let payment = PaymentRequestInput::from_body(body)?.validate()?;
    let request = PayloadRequest::payment(&payment, state.return_urls.clone());

    info!(
        "Creating payment payload: provider={}, destination={}, amount={}, return_url={}",
        state.provider.provider_name(),
        payment.destination,
        payment.amount,
        request.options.return_url.web
    );

    let payload = state.provider.create_payload(&credentials, &request).await?;
    let result = payload.into_result()?;

    info!("Created payment payload: {}", result.payload_id);

    Ok(result)
}
