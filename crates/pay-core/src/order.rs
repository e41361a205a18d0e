//! # Order Types
//!
//! Order requests as received from clients, the validated parameters sent
//! to the gateway, and the opaque order the gateway hands back.

use crate::currency::{to_minor_units, Currency};
use crate::error::{PaymentError, PaymentResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Longest receipt the gateway accepts
pub const MAX_RECEIPT_LEN: usize = 40;

/// Most note entries the gateway accepts on an order
pub const MAX_NOTES: usize = 15;

/// Amount as sent by a client: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Numeric value of the amount, without range checks
    pub fn value(&self) -> PaymentResult<f64> {
        match self {
            AmountInput::Number(n) => Ok(*n),
            AmountInput::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                PaymentError::InvalidArgument("Valid amount is required".to_string())
            }),
        }
    }
}

impl From<f64> for AmountInput {
    fn from(amount: f64) -> Self {
        AmountInput::Number(amount)
    }
}

/// Order creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Amount in major currency units (e.g. rupees)
    #[serde(default)]
    pub amount: Option<AmountInput>,

    /// ISO 4217 code, defaults to INR
    #[serde(default)]
    pub currency: Option<String>,

    /// Merchant receipt reference, generated when absent
    #[serde(default)]
    pub receipt: Option<String>,

    /// Free-form key/value notes forwarded to the gateway
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

impl OrderRequest {
    /// Create a request for the given amount in major units
    pub fn new(amount: impl Into<AmountInput>) -> Self {
        Self {
            amount: Some(amount.into()),
            ..Default::default()
        }
    }

    /// Set currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set receipt
    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    /// Add a note
    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }

    /// Validate the request and fill in defaults.
    ///
    /// Amount is checked first, so a bad amount is reported even when
    /// other fields are also wrong.
    pub fn into_params(self) -> PaymentResult<OrderParams> {
        let amount = match &self.amount {
            Some(input) => to_minor_units(input.value()?)?,
            None => {
                return Err(PaymentError::InvalidArgument(
                    "Valid amount is required".to_string(),
                ))
            }
        };

        let currency = Currency::resolve(self.currency.as_deref())?;

        let receipt = match self.receipt {
            Some(r) if !r.trim().is_empty() => r,
            _ => generate_receipt(),
        };
        if receipt.chars().count() > MAX_RECEIPT_LEN {
            return Err(PaymentError::InvalidArgument(format!(
                "Receipt must be at most {} characters",
                MAX_RECEIPT_LEN
            )));
        }

        if self.notes.len() > MAX_NOTES {
            return Err(PaymentError::InvalidArgument(format!(
                "At most {} notes are allowed",
                MAX_NOTES
            )));
        }

        Ok(OrderParams {
            amount,
            currency,
            receipt,
            notes: self.notes,
        })
    }
}

/// Receipt derived from the current time.
///
/// Two requests in the same millisecond get the same receipt.
pub fn generate_receipt() -> String {
    format!("receipt_{}", Utc::now().timestamp_millis())
}

/// Validated order parameters, in the gateway's wire shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderParams {
    /// Amount in minor units
    pub amount: i64,
    pub currency: Currency,
    pub receipt: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

/// Order as returned by the gateway.
///
/// Not interpreted beyond a few accessors used for logging; the full
/// payload is forwarded to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(serde_json::Value);

impl Order {
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Gateway order ID (e.g. `order_IluGWxBm9U8zJ8`)
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|v| v.as_str())
    }

    /// Gateway order status (e.g. `created`)
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    /// Amount in minor units as recorded by the gateway
    pub fn amount(&self) -> Option<i64> {
        self.0.get("amount").and_then(|v| v.as_i64())
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
