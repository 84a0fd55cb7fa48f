//! # Routes
//!
//! Axum router configuration for the payment request API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Path of the payment request endpoint
pub const CREATE_PAYMENT_PATH: &str = "/api/create-xumm-payment";

/// Create the main application router
///
/// Routes:
///   - POST /api/create-xumm-payment - Create payload, return QR + deep link
///     (any other method gets a JSON 405 from the handler)
///   - GET  /health, GET / - Health check
///
/// No CORS layer: the page showing the QR code is served from the same
/// origin, and a CORS layer would answer OPTIONS before the handler's 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route(CREATE_PAYMENT_PATH, any(handlers::create_xumm_payment))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
