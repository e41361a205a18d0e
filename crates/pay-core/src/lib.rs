//! # pay-core
//!
//! Core types and traits for razor-cart.
//!
//! This crate provides:
//! - `PaymentGateway` trait for hosted gateways that create orders
//! - `OrderRequest`, `OrderParams`, and `Order` for order creation
//! - `Currency` and minor-unit conversion
//! - `PaymentVerification` and `VerificationOutcome` for callback checks
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{OrderRequest, PaymentGateway};
//!
//! // 499.99 INR -> 49999 paise
//! let params = OrderRequest::new(499.99).into_params()?;
//! let order = gateway.create_order(&params).await?;
//! ```

pub mod currency;
pub mod error;
pub mod gateway;
pub mod order;
pub mod verification;

// Re-exports for convenience
pub use currency::{to_minor_units, Currency, DEFAULT_CURRENCY};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use order::{generate_receipt, AmountInput, Order, OrderParams, OrderRequest};
pub use verification::{PaymentVerification, VerificationOutcome};
