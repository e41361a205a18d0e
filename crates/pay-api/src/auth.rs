//! # Authentication
//!
//! Protected routes sit behind `require_auth`, which reads
//! `Authorization: Bearer <token>` and asks an `Authenticator` who the
//! caller is. Real identity lives outside this service; plug a session or
//! JWT validator in through the trait. The bundled
//! `StaticTokenAuthenticator` accepts a fixed list of API tokens.
//!
//! ```text
//! Request → require_auth → Authenticator::authenticate → Principal in extensions → handler
//! ```

use crate::handlers::ErrorResponse;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use pay_razorpay::signature::constant_time_compare;
use thiserror::Error;
use tracing::{error, warn};

/// Authenticated caller, available to handlers via `Extension<Principal>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized - No token provided")]
    MissingToken,

    #[error("Unauthorized - Invalid token")]
    InvalidToken,

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Resolves a bearer token to a caller
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Accepts a fixed set of API tokens. With no tokens, rejects everything.
pub struct StaticTokenAuthenticator {
    tokens: Vec<String>,
}

impl StaticTokenAuthenticator {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        self.tokens
            .iter()
            .position(|t| constant_time_compare(t, token))
            .map(|i| Principal {
                subject: format!("api-token-{}", i),
            })
            .ok_or(AuthError::InvalidToken)
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware guarding protected routes
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Owned copy: the request body is not Sync, so no borrow may cross the await
    let token = bearer_token(&request).map(String::from);
    let result = match token {
        Some(token) => state.authenticator.authenticate(&token).await,
        None => Err(AuthError::MissingToken),
    };

    match result {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            match &e {
                AuthError::Unavailable(msg) => error!("Auth service unavailable: {}", msg),
                _ => warn!("Rejected request to {}: {}", request.uri().path(), e),
            }
            (e.status_code(), Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}
