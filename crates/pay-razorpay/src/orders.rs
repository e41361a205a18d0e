//! # Razorpay Orders API
//!
//! HTTP client for `POST /v1/orders`. An order must exist before the
//! frontend can open Razorpay Checkout for it.

use crate::config::RazorpayConfig;
use async_trait::async_trait;
use pay_core::{Order, OrderParams, PaymentError, PaymentGateway, PaymentResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Razorpay order gateway.
///
/// Holds one `reqwest::Client` for the lifetime of the process; it is
/// cheap to share behind an `Arc` and safe to use concurrently.
pub struct RazorpayClient {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayClient {
    /// Create a client. Both credentials must be configured.
    pub fn new(config: RazorpayConfig) -> PaymentResult<Self> {
        config.require_credentials()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.config.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency, receipt = %params.receipt))]
    async fn create_order(&self, params: &OrderParams) -> PaymentResult<Order> {
        let (key_id, key_secret) = self.config.require_credentials()?;
        let url = self.orders_url();

        debug!("Creating Razorpay order");

        let response = self
            .client
            .post(&url)
            .basic_auth(key_id, Some(key_secret))
            .json(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::gateway("Razorpay request timed out")
                } else {
                    PaymentError::gateway(format!("Failed to reach Razorpay: {}", e))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PaymentError::gateway(format!("Failed to read Razorpay response: {}", e))
        })?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            // Parse Razorpay error
            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                let message = error_response
                    .error
                    .get("description")
                    .and_then(|d| d.as_str())
                    .map(String::from)
                    .unwrap_or_else(|| format!("HTTP {}", status));
                return Err(PaymentError::Gateway {
                    message,
                    detail: Some(error_response.error),
                });
            }

            return Err(PaymentError::gateway(format!("HTTP {}: {}", status, body)));
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Internal(format!("Failed to parse Razorpay response: {}", e))
        })?;
        if !value.is_object() {
            return Err(PaymentError::Internal(
                "Razorpay returned a non-object order".to_string(),
            ));
        }

        let order = Order::from_value(value);
        info!(
            "Created Razorpay order: id={}, status={}",
            order.id().unwrap_or("unknown"),
            order.status().unwrap_or("unknown")
        );

        Ok(order)
    }

    fn provider_name(&self) -> &'static str {
        "razorpay"
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

/// `{"error": {"code": "...", "description": "...", ...}}`
#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: serde_json::Value,
}
