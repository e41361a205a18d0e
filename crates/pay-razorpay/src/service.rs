//! # Payment Service
//!
//! The three operations exposed to the HTTP layer:
//!
//! - `create_order` - validate, convert to paise, create the order at Razorpay
//! - `verify_payment` - check the checkout signature locally, no I/O
//! - `public_key` - the key ID the frontend needs to open Checkout
//!
//! Built once at startup and shared; holds no mutable state.

use crate::config::RazorpayConfig;
use crate::orders::RazorpayClient;
use crate::signature::verify_payment_signature;
use pay_core::{
    BoxedPaymentGateway, Order, OrderRequest, PaymentError, PaymentResult, PaymentVerification,
    VerificationOutcome,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct PaymentService {
    config: Arc<RazorpayConfig>,
    /// Absent when credentials are incomplete; order creation then fails
    /// with a configuration error instead of the whole service refusing to start.
    gateway: Option<BoxedPaymentGateway>,
}

impl PaymentService {
    /// Build the service, creating a Razorpay client when both
    /// credentials are present.
    pub fn from_config(config: RazorpayConfig) -> PaymentResult<Self> {
        let gateway = if config.require_credentials().is_ok() {
            Some(Arc::new(RazorpayClient::new(config.clone())?) as BoxedPaymentGateway)
        } else {
            warn!("Razorpay credentials incomplete, order creation is disabled");
            None
        };

        Ok(Self {
            config: Arc::new(config),
            gateway,
        })
    }

    /// Build the service around an existing gateway (for testing or
    /// alternative gateways)
    pub fn with_gateway(config: RazorpayConfig, gateway: BoxedPaymentGateway) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Some(gateway),
        }
    }

    /// Build the service with no gateway at all
    pub fn without_gateway(config: RazorpayConfig) -> Self {
        Self {
            config: Arc::new(config),
            gateway: None,
        }
    }

    pub fn config(&self) -> &RazorpayConfig {
        &self.config
    }

    /// Name of the configured gateway, if any
    pub fn provider(&self) -> Option<&'static str> {
        self.gateway.as_ref().map(|g| g.provider_name())
    }

    /// Create a gateway order.
    ///
    /// Input is validated before anything else; invalid input never
    /// reaches the gateway.
    #[instrument(skip(self, request))]
    pub async fn create_order(&self, request: OrderRequest) -> PaymentResult<Order> {
        let params = request.into_params()?;

        let gateway = self.gateway.as_ref().ok_or_else(|| {
            PaymentError::Configuration(
                "Missing Razorpay credentials. Set RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET"
                    .to_string(),
            )
        })?;

        info!(
            "Creating order: amount={} {}, receipt={}",
            params.amount, params.currency, params.receipt
        );

        gateway.create_order(&params).await
    }

    /// Verify a checkout signature.
    ///
    /// A missing key secret is reported before the input is looked at.
    #[instrument(skip(self, verification), fields(order_id = %verification.order_id, payment_id = %verification.payment_id))]
    pub fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> PaymentResult<VerificationOutcome> {
        let secret = self.config.require_key_secret()?;
        verification.validate()?;

        let authentic = verify_payment_signature(
            secret,
            &verification.order_id,
            &verification.payment_id,
            &verification.signature,
        )?;

        if authentic {
            info!("Payment signature verified");
            Ok(VerificationOutcome::authentic())
        } else {
            warn!("Payment signature mismatch");
            Ok(VerificationOutcome::rejected())
        }
    }

    /// Publishable key ID for the frontend. Never the secret.
    pub fn public_key(&self) -> PaymentResult<&str> {
        self.config.require_key_id()
    }
}
