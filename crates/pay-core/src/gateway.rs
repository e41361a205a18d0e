//! # Payment Gateway Trait
//!
//! Seam between order creation and the hosted gateway that actually
//! creates orders. The production implementation talks HTTP to Razorpay;
//! tests substitute in-memory gateways.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentGateway (trait)                   │
//! │  ├── create_order()                                         │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!              ┌─────────────┴─────────────┐
//!      ┌───────┴───────┐           ┌───────┴───────┐
//!      │RazorpayClient │           │  test doubles │
//!      └───────────────┘           └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::order::{Order, OrderParams};
use async_trait::async_trait;
use std::sync::Arc;

/// A hosted payment gateway that can create orders.
///
/// Implementations are shared across concurrent requests and must be
/// read-only after construction.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for already-validated parameters.
    ///
    /// # Errors
    /// * `PaymentError::Gateway` - the gateway rejected the order or was unreachable
    /// * `PaymentError::Internal` - the gateway's answer could not be understood
    async fn create_order(&self, params: &OrderParams) -> PaymentResult<Order>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Shared gateway handle (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderRequest;
    use serde_json::json;

    struct EchoGateway;

    #[async_trait]
    impl PaymentGateway for EchoGateway {
        async fn create_order(&self, params: &OrderParams) -> PaymentResult<Order> {
            Ok(Order::from_value(json!({
                "id": "order_echo",
                "amount": params.amount,
                "currency": params.currency.as_str(),
            })))
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_boxed_gateway_dispatch() {
        let gateway: BoxedPaymentGateway = Arc::new(EchoGateway);
        let params = OrderRequest::new(12.34).into_params().unwrap();

        let order = gateway.create_order(&params).await.unwrap();

        assert_eq!(gateway.provider_name(), "echo");
        assert_eq!(order.id(), Some("order_echo"));
        assert_eq!(order.amount(), Some(1234));
    }
}
