//! # Razorpay Configuration
//!
//! Credentials and client settings, loaded once from the environment.
//!
//! Both keys are optional at load time: the key ID alone is enough to
//! serve the publishable key, the secret alone is enough to verify
//! payments, and order creation needs both. Each operation reports its
//! own `PaymentError::Configuration` when something it needs is missing.

use pay_core::{PaymentError, PaymentResult};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Razorpay API configuration
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Key ID (rzp_test_... or rzp_live_...), safe to hand to a frontend
    pub key_id: Option<String>,

    /// Key secret, never exposed
    key_secret: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Request timeout for gateway calls
    pub timeout: Duration,
}

impl RazorpayConfig {
    /// Load configuration from environment variables.
    ///
    /// Read env vars:
    /// - `RAZORPAY_KEY_ID`
    /// - `RAZORPAY_KEY_SECRET`
    /// - `RAZORPAY_API_BASE_URL` (optional)
    /// - `RAZORPAY_TIMEOUT_SECS` (optional)
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timeout = match non_empty_var("RAZORPAY_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                PaymentError::Configuration(format!(
                    "RAZORPAY_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            key_id: non_empty_var("RAZORPAY_KEY_ID"),
            key_secret: non_empty_var("RAZORPAY_KEY_SECRET"),
            api_base_url: non_empty_var("RAZORPAY_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            timeout,
        })
    }

    /// Create config with explicit credentials (for testing)
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: Some(key_id.into()),
            key_secret: Some(key_secret.into()),
            ..Self::empty()
        }
    }

    /// Config with no credentials at all
    pub fn empty() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Publishable key ID, or a configuration error
    pub fn require_key_id(&self) -> PaymentResult<&str> {
        self.key_id.as_deref().ok_or_else(|| {
            PaymentError::Configuration("Missing Razorpay key id on server".to_string())
        })
    }

    /// Key secret, or a configuration error
    pub fn require_key_secret(&self) -> PaymentResult<&str> {
        self.key_secret.as_deref().ok_or_else(|| {
            PaymentError::Configuration("Missing Razorpay key secret on server".to_string())
        })
    }

    /// Both credentials, as needed for API calls
    pub fn require_credentials(&self) -> PaymentResult<(&str, &str)> {
        match (self.key_id.as_deref(), self.key_secret.as_deref()) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(PaymentError::Configuration(
                "Missing Razorpay credentials. Set RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET"
                    .to_string(),
            )),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.key_id
            .as_deref()
            .is_some_and(|k| k.starts_with("rzp_test_"))
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.key_id
            .as_deref()
            .is_some_and(|k| k.starts_with("rzp_live_"))
    }

    /// Builder: set key ID
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Builder: set key secret
    pub fn with_key_secret(mut self, key_secret: impl Into<String>) -> Self {
        self.key_secret = Some(key_secret.into());
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &self.key_secret.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
