//! # Payment Error Types
//!
//! Typed error handling for payment request creation.
//! Every handler step returns `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for payment request operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid or incomplete request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered, but the reply lacks a link, QR reference or identifier
    #[error("Incomplete provider response: {raw}")]
    ProviderResponse { raw: serde_json::Value },

    /// Provider call failed (transport error or provider-side rejection)
    #[error("Provider call failed: {0}")]
    ProviderCall(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::MethodNotAllowed => 405,
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::ProviderResponse { .. } => 500,
            PaymentError::ProviderCall(_) => 500,
        }
    }

    /// Message returned to the caller.
    ///
    /// Server-side failures get a fixed message; the full detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            PaymentError::MethodNotAllowed => "Method Not Allowed".to_string(),
            PaymentError::Configuration(_) => {
                "Server configuration error: XUMM API keys are missing.".to_string()
            }
            PaymentError::InvalidRequest(message) => message.clone(),
            PaymentError::ProviderResponse { .. } => {
                "Failed to create XUMM payment payload.".to_string()
            }
            PaymentError::ProviderCall(_) => {
                "Internal server error during XUMM payload creation.".to_string()
            }
        }
    }

    /// Extra detail exposed in the `error` field of the response body
    pub fn detail(&self) -> Option<&str> {
        match self {
            PaymentError::ProviderCall(message) => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
