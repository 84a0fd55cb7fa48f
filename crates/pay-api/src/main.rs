//! # xaman-qr-pay
//!
//! Payment request endpoint for the Xaman (XUMM) wallet.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export XUMM_API_KEY=...
//! export XUMM_API_SECRET=...
//! export PUBLIC_HOST=pay.example.com   # optional
//!
//! # Run the server
//! xaman-qr-pay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payload provider: {}", state.provider.provider_name());
    info!("Wallet return URL: {}", state.return_urls.web);

    // Requests still get a 500 until both secrets are set
    if !state.xumm.is_configured() {
        warn!("XUMM_API_KEY / XUMM_API_SECRET not set; payment requests will fail");
    }

    let app = routes::create_router(state);

    info!("🚀 xaman-qr-pay starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("💳 Payment: POST http://{}{}", addr, routes::CREATE_PAYMENT_PATH);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  ⚡ xaman-qr-pay ⚡
  ━━━━━━━━━━━━━━━━━━━━━━━
  XRP payment requests over QR
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
