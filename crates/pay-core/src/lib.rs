//! # pay-core
//!
//! Core types and traits for xaman-qr-pay.
//!
//! This crate provides:
//! - `PayloadProvider` trait for the service that creates signable payloads
//! - `PaymentRequestInput` validation and `XrpAmount` drop conversion
//! - `PayloadRequest` / `CreatedPayload` / `PaymentRequestResult` wire shapes
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{PaymentRequestInput, PayloadRequest, ReturnUrls};
//!
//! let payment = PaymentRequestInput::from_body(&body)?.validate()?;
//! let request = PayloadRequest::payment(&payment, ReturnUrls::for_public_host(host));
//!
//! let result = provider
//!     .create_payload(&credentials, &request)
//!     .await?
//!     .into_result()?;
//!
//! // Show result.qr_code_url, or open result.deep_link on mobile
//! ```

pub mod amount;
pub mod error;
pub mod payload;
pub mod provider;

// Re-exports for convenience
pub use amount::{AmountError, XrpAmount, DROPS_PER_XRP};
pub use error::{PaymentError, PaymentResult};
pub use payload::{
    CreatedPayload, PayloadRequest, PaymentRequestInput, PaymentRequestResult,
    PaymentTransaction, ValidatedPayment, INVALID_AMOUNT_MESSAGE, MISSING_FIELDS_MESSAGE,
};
pub use provider::{BoxedPayloadProvider, PayloadProvider, ProviderCredentials, ReturnUrls};
