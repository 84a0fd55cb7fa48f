//! # pay-api
//!
//! HTTP API layer for xaman-qr-pay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment request endpoint backed by the XUMM platform API
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/create-xumm-payment` | Create payment payload, returns QR code URL + deep link |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, CREATE_PAYMENT_PATH};
pub use state::{AppConfig, AppState};
