//! # Currency
//!
//! ISO 4217 currency codes and minor-unit conversion.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Currency used when a request does not name one
pub const DEFAULT_CURRENCY: &str = "INR";

/// Three-letter ISO 4217 code, stored upper case (the gateway's format)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Parse a currency code, normalizing to upper case.
    ///
    /// Only the shape is checked; whether the gateway accepts the
    /// currency for this account is the gateway's call.
    pub fn parse(code: &str) -> PaymentResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::InvalidArgument(format!(
                "Currency must be a three-letter ISO 4217 code, got {:?}",
                code
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve an optional request value, falling back to the default.
    /// Empty strings count as absent.
    pub fn resolve(code: Option<&str>) -> PaymentResult<Self> {
        match code.map(str::trim) {
            Some(c) if !c.is_empty() => Self::parse(c),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency(DEFAULT_CURRENCY.to_string())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a decimal amount to minor units (paise, cents).
///
/// Always scales by 100 regardless of currency, matching the gateway
/// integration this crate targets. Rounds half away from zero
/// (`f64::round`); for the positive amounts accepted here that is the
/// same as rounding half up.
///
/// Rejects amounts that are not finite, not strictly positive, round to
/// zero minor units (e.g. `0.001`), or are too large to represent in
/// `i64` minor units.
pub fn to_minor_units(amount: f64) -> PaymentResult<i64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidArgument(
            "Valid amount is required".to_string(),
        ));
    }

    let scaled = (amount * 100.0).round();
    if scaled < 1.0 {
        return Err(PaymentError::InvalidArgument(
            "Amount must be at least one minor unit".to_string(),
        ));
    }
    if scaled >= i64::MAX as f64 {
        return Err(PaymentError::InvalidArgument(
            "Amount is too large".to_string(),
        ));
    }

    Ok(scaled as i64)
}
