//! # pay-xumm
//!
//! XUMM (Xaman wallet) payload provider for xaman-qr-pay.
//!
//! `XummPayloadClient` calls the XUMM platform REST API to create a signable
//! Payment payload and returns the reply untouched; checking that the reply
//! carries a QR image, a deep link and a payload UUID is left to
//! `CreatedPayload::into_result()`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_xumm::{XummConfig, XummPayloadClient};
//! use pay_core::PayloadProvider;
//!
//! let config = XummConfig::from_env();
//! let client = XummPayloadClient::new(&config)?;
//!
//! let payload = client
//!     .create_payload(&config.credentials()?, &request)
//!     .await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::{XummPayloadClient, CREATE_PAYLOAD_PATH};
pub use config::{XummConfig, DEFAULT_API_BASE_URL};
