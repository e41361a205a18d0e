//! # pay-razorpay
//!
//! Razorpay integration for razor-cart.
//!
//! Payment flow:
//!
//! 1. Backend creates an order (`PaymentService::create_order`), amount in paise
//! 2. Frontend opens Razorpay Checkout with the order ID and the public key
//!    (`PaymentService::public_key`)
//! 3. Checkout returns `razorpay_order_id`, `razorpay_payment_id` and
//!    `razorpay_signature` to the frontend
//! 4. Backend checks the signature (`PaymentService::verify_payment`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_razorpay::{PaymentService, RazorpayConfig};
//! use pay_core::{OrderRequest, PaymentVerification};
//!
//! let service = PaymentService::from_config(RazorpayConfig::from_env()?)?;
//!
//! let order = service.create_order(OrderRequest::new(499.99)).await?;
//!
//! // ...after checkout...
//! let outcome = service.verify_payment(&PaymentVerification::new(
//!     order_id, payment_id, signature,
//! ))?;
//! assert!(outcome.authentic);
//! ```

pub mod config;
pub mod orders;
pub mod service;
pub mod signature;

// Re-exports
pub use config::RazorpayConfig;
pub use orders::RazorpayClient;
pub use service::PaymentService;
pub use signature::{
    expected_payment_signature, verify_payment_signature, verify_webhook_signature,
};
