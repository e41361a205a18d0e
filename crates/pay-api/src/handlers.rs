//! # Request Handlers
//!
//! Axum request handlers for the order API.
//! Every response carries a `success` flag; failures add a `message` and,
//! for gateway failures, the upstream `error` payload.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{Order, OrderRequest, PaymentError, PaymentVerification};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Payment verification request, as posted by Razorpay Checkout's handler.
///
/// Absent and `null` fields both become empty strings, leaving the
/// service to decide between a configuration and an input error.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
}

impl From<VerifyPaymentRequest> for PaymentVerification {
    fn from(req: VerifyPaymentRequest) -> Self {
        PaymentVerification::new(
            req.razorpay_order_id.unwrap_or_default(),
            req.razorpay_payment_id.unwrap_or_default(),
            req.razorpay_signature.unwrap_or_default(),
        )
    }
}

/// Create order response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: Order,
}

/// Verify payment response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub payment_id: String,
    pub order_id: String,
}

/// Public key response
#[derive(Debug, Serialize)]
pub struct KeyResponse {
    pub success: bool,
    pub key: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: serde_json::Value) -> Self {
        self.error = Some(error);
        self
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = ErrorResponse::new(err.public_message());
    if let Some(detail) = err.detail() {
        response = response.with_error(detail.clone());
    }
    (status, Json(response))
}

fn json_rejection_to_response(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "razor-cart",
        "version": env!("CARGO_PKG_VERSION"),
        "gateway": state.payments.provider(),
    }))
}

/// Create a gateway order
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let Json(request) = payload.map_err(json_rejection_to_response)?;

    let order = state.payments.create_order(request).await.map_err(|e| {
        error!(kind = e.kind(), "Error in create_order: {}", e);
        payment_error_to_response(e)
    })?;

    info!("Order created: {}", order.id().unwrap_or("unknown"));

    Ok(Json(CreateOrderResponse {
        success: true,
        order,
    }))
}

/// Verify a checkout payment signature
#[instrument(skip(state, payload))]
pub async fn verify_payment(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let Json(request) = payload.map_err(json_rejection_to_response)?;
    let verification = PaymentVerification::from(request);

    let outcome = state
        .payments
        .verify_payment(&verification)
        .map_err(|e| {
            error!(kind = e.kind(), "Error in verify_payment: {}", e);
            payment_error_to_response(e)
        })?;

    if !outcome.authentic {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Payment verification failed")),
        ));
    }

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
        payment_id: verification.payment_id,
        order_id: verification.order_id,
    }))
}

/// Publishable key for Razorpay Checkout
pub async fn get_key(State(state): State<AppState>) -> Result<Json<KeyResponse>, ApiError> {
    let key = state.payments.public_key().map_err(|e| {
        error!(kind = e.kind(), "Error in get_key: {}", e);
        payment_error_to_response(e)
    })?;

    Ok(Json(KeyResponse {
        success: true,
        key: key.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Test error")).unwrap();
        assert_eq!(body, json!({ "success": false, "message": "Test error" }));
    }

    #[test]
    fn test_payment_error_conversion() {
        let (status, _) =
            payment_error_to_response(PaymentError::InvalidArgument("Bad data".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            payment_error_to_response(PaymentError::Configuration("no key".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_gateway_detail_is_forwarded() {
        let (status, Json(body)) = payment_error_to_response(PaymentError::Gateway {
            message: "Authentication failed".into(),
            detail: Some(json!({ "code": "BAD_REQUEST_ERROR" })),
        });

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Authentication failed");
        assert_eq!(body.error.unwrap()["code"], "BAD_REQUEST_ERROR");
    }

    #[test]
    fn test_null_verify_fields_become_empty() {
        let req: VerifyPaymentRequest = serde_json::from_value(json!({
            "razorpay_order_id": null,
            "razorpay_payment_id": "pay_1"
        }))
        .unwrap();
        let verification = PaymentVerification::from(req);

        assert_eq!(verification.order_id, "");
        assert_eq!(verification.payment_id, "pay_1");
        assert_eq!(verification.signature, "");
    }

    #[test]
    fn test_verify_response_uses_camel_case() {
        let body = serde_json::to_value(VerifyPaymentResponse {
            success: true,
            message: "Payment verified successfully".into(),
            payment_id: "pay_1".into(),
            order_id: "order_1".into(),
        })
        .unwrap();

        assert_eq!(body["paymentId"], "pay_1");
        assert_eq!(body["orderId"], "order_1");
    }
}
