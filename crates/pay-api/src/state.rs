//! # Application State
//!
//! Shared state for the Axum application.
//! Everything in here is built once at startup and only read afterwards.

use crate::auth::{Authenticator, StaticTokenAuthenticator};
use pay_razorpay::{PaymentService, RazorpayConfig};
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Bearer tokens accepted on protected routes
    pub api_tokens: Vec<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            api_tokens: std::env::var("API_TOKENS")
                .map(|raw| parse_tokens(&raw))
                .unwrap_or_default(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("api_tokens", &format!("<{} configured>", self.api_tokens.len()))
            .finish()
    }
}

/// Comma-separated token list, blanks dropped
fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order creation, verification and key disclosure
    pub payments: PaymentService,
    /// Validates bearer tokens on protected routes
    pub authenticator: Arc<dyn Authenticator>,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create the state from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let razorpay = RazorpayConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Razorpay config: {}", e))?;
        let payments = PaymentService::from_config(razorpay)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;

        if config.api_tokens.is_empty() {
            tracing::warn!("API_TOKENS is empty, protected routes will reject every request");
        }
        let authenticator = Arc::new(StaticTokenAuthenticator::new(config.api_tokens.clone()));

        Ok(Self::new(config, payments, authenticator))
    }

    /// Assemble state from parts
    pub fn new(
        config: AppConfig,
        payments: PaymentService,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            payments,
            authenticator,
            config: Arc::new(config),
        }
    }
}
