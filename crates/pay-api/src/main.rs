//! # Razor-Cart
//!
//! Razorpay order and payment verification service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export RAZORPAY_KEY_ID=rzp_test_...
//! export RAZORPAY_KEY_SECRET=...
//! export API_TOKENS=token-for-frontend
//!
//! # Run the server
//! razor-cart
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
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

    // Initialize application state
    let state = AppState::from_env()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Razorpay: gateway={:?}, test_mode={}",
        state.payments.provider(),
        state.payments.config().is_test_mode()
    );

    let app = routes::create_router(state);

    info!("Razor-Cart starting on http://{}", addr);

    if !is_prod {
        info!("Key:    GET  http://{}/order/get-key", addr);
        info!("Create: POST http://{}/order/create", addr);
        info!("Verify: POST http://{}/order/verify", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

fn print_banner() {
    println!(
        r#"
  Razor-Cart
  ━━━━━━━━━━━━━━━━━━━━━━━
  Razorpay orders & verification
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
