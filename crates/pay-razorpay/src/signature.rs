//! # Razorpay Signatures
//!
//! After checkout, Razorpay hands the client `razorpay_order_id`,
//! `razorpay_payment_id` and `razorpay_signature`. The signature is
//! `hex(HMAC-SHA256(key_secret, order_id + "|" + payment_id))`.
//!
//! The message is not escaped: identifiers containing `|` could collide.
//! Razorpay's own verification uses the same format, so it is kept as is.
//!
//! Webhooks use the same primitive over the raw request body with the
//! webhook secret configured in the dashboard.

use hmac::{Hmac, Mac};
use pay_core::{PaymentError, PaymentResult};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Message signed for a checkout payment
pub fn signature_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// Lowercase hex HMAC-SHA256 of `message` under `secret`
pub fn compute_hmac_sha256(secret: &str, message: &[u8]) -> PaymentResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::Internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Expected checkout signature for an order/payment pair
pub fn expected_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
) -> PaymentResult<String> {
    compute_hmac_sha256(secret, signature_payload(order_id, payment_id).as_bytes())
}

/// Check a checkout signature. Any mismatch, including a malformed
/// signature, is `Ok(false)`.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> PaymentResult<bool> {
    let expected = expected_payment_signature(secret, order_id, payment_id)?;
    Ok(constant_time_compare(&expected, signature))
}

/// Check an `X-Razorpay-Signature` header against a raw webhook body
pub fn verify_webhook_signature(
    webhook_secret: &str,
    body: &[u8],
    signature: &str,
) -> PaymentResult<bool> {
    let expected = compute_hmac_sha256(webhook_secret, body)?;
    Ok(constant_time_compare(&expected, signature))
}

/// Byte comparison whose running time does not depend on where the
/// inputs first differ. Length is not secret.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
