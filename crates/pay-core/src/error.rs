//! # Payment Error Types
//!
//! Typed error handling for razor-cart.
//! All payment operations return `Result<T, PaymentError>`.
//!
//! A failed signature check is not an error: verification reports it as
//! `authentic: false`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Bad client input (amount, currency, missing verification fields)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Server-side configuration is missing or unusable (operator-fixable)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The payment gateway rejected the request or could not be reached
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        /// Raw upstream error payload, forwarded to the caller as-is
        detail: Option<serde_json::Value>,
    },

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Gateway error without an upstream payload
    pub fn gateway(message: impl Into<String>) -> Self {
        PaymentError::Gateway {
            message: message.into(),
            detail: None,
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentError::InvalidArgument(_) => "invalid_argument",
            PaymentError::Configuration(_) => "configuration_error",
            PaymentError::Gateway { .. } => "gateway_error",
            PaymentError::Internal(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidArgument(_) => 400,
            PaymentError::Configuration(_) => 500,
            PaymentError::Gateway { .. } => 500,
            PaymentError::Internal(_) => 500,
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Internal errors are collapsed to a generic message.
    pub fn public_message(&self) -> String {
        match self {
            PaymentError::InvalidArgument(msg) | PaymentError::Configuration(msg) => msg.clone(),
            PaymentError::Gateway { message, .. } => message.clone(),
            PaymentError::Internal(_) => "Server error".to_string(),
        }
    }

    /// Upstream detail, only present for gateway errors
    pub fn detail(&self) -> Option<&serde_json::Value> {
        match self {
            PaymentError::Gateway { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
