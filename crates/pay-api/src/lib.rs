//! # pay-api
//!
//! HTTP API layer for razor-cart.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Order creation and payment verification endpoints
//! - Bearer-token middleware in front of the order endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Auth | Description |
//! |--------|------|------|-------------|
//! | GET | `/health` | no | Health check |
//! | GET | `/order/get-key` | no | Razorpay key ID for Checkout |
//! | POST | `/order/create` | yes | Create Razorpay order |
//! | POST | `/order/verify` | yes | Verify payment signature |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::{Authenticator, Principal, StaticTokenAuthenticator};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
