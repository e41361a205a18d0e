//! # Payment Verification Types
//!
//! Inputs and result of checking a payment callback signature.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Identifiers and signature handed back by the gateway after checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentVerification {
    pub fn new(
        order_id: impl Into<String>,
        payment_id: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            payment_id: payment_id.into(),
            signature: signature.into(),
        }
    }

    /// All three fields are mandatory and must be non-empty
    pub fn validate(&self) -> PaymentResult<()> {
        if self.order_id.is_empty() || self.payment_id.is_empty() || self.signature.is_empty() {
            return Err(PaymentError::InvalidArgument(
                "Missing payment verification data".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a signature check. A mismatch is `authentic: false`, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub authentic: bool,
}

impl VerificationOutcome {
    pub fn authentic() -> Self {
        Self { authentic: true }
    }

    pub fn rejected() -> Self {
        Self { authentic: false }
    }
}
