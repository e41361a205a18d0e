//! End-to-end tests for the order API, with an in-memory gateway.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use pay_api::{create_router, AppConfig, AppState, StaticTokenAuthenticator};
use pay_core::{Order, OrderParams, PaymentError, PaymentGateway, PaymentResult};
use pay_razorpay::{expected_payment_signature, PaymentService, RazorpayConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const TOKEN: &str = "test-token";
const KEY_ID: &str = "rzp_test_key";
const SECRET: &str = "s3cr3t";

#[derive(Default)]
struct FakeGateway {
    calls: Mutex<Vec<OrderParams>>,
    fail: bool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(&self, params: &OrderParams) -> PaymentResult<Order> {
        self.calls.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(PaymentError::Gateway {
                message: "Authentication failed".into(),
                detail: Some(json!({
                    "code": "BAD_REQUEST_ERROR",
                    "description": "Authentication failed"
                })),
            });
        }
        Ok(Order::from_value(json!({
            "id": "order_IluGWxBm9U8zJ8",
            "entity": "order",
            "amount": params.amount,
            "currency": params.currency.as_str(),
            "receipt": params.receipt,
            "status": "created"
        })))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn app_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        environment: "test".into(),
        api_tokens: vec![TOKEN.into()],
    }
}

fn server_with(payments: PaymentService) -> TestServer {
    let authenticator = Arc::new(StaticTokenAuthenticator::new(vec![TOKEN.into()]));
    let state = AppState::new(app_config(), payments, authenticator);
    TestServer::new(create_router(state)).unwrap()
}

fn server(gateway: Arc<FakeGateway>) -> TestServer {
    server_with(PaymentService::with_gateway(
        RazorpayConfig::new(KEY_ID, SECRET),
        gateway,
    ))
}

#[tokio::test]
async fn health_is_public() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn get_key_returns_key_id_only() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server.get("/order/get-key").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body, json!({ "success": true, "key": KEY_ID }));
    assert!(!response.text().contains(SECRET));
}

#[tokio::test]
async fn get_key_without_key_id_is_500() {
    let server = server_with(PaymentService::without_gateway(
        RazorpayConfig::empty().with_key_secret(SECRET),
    ));

    let response = server.get("/order/get-key").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing Razorpay key id on server");
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server
        .post("/order/create")
        .json(&json!({ "amount": 10 }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["success"], false);

    let response = server
        .post("/order/verify")
        .authorization_bearer("wrong-token")
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_order_converts_to_minor_units() {
    let gateway = Arc::new(FakeGateway::default());
    let server = server(gateway.clone());

    let response = server
        .post("/order/create")
        .authorization_bearer(TOKEN)
        .json(&json!({ "amount": 499.99 }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["id"], "order_IluGWxBm9U8zJ8");
    assert_eq!(body["order"]["amount"], 49999);

    let calls = gateway.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount, 49999);
    assert_eq!(calls[0].currency.as_str(), "INR");
    assert!(calls[0].receipt.starts_with("receipt_"));
}

#[tokio::test]
async fn create_order_accepts_string_amount_and_options() {
    let gateway = Arc::new(FakeGateway::default());
    let server = server(gateway.clone());

    let response = server
        .post("/order/create")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "amount": "25",
            "currency": "usd",
            "receipt": "rcpt_7",
            "notes": { "cart": "c-1" }
        }))
        .await;

    response.assert_status_ok();
    let calls = gateway.calls.lock().unwrap();
    assert_eq!(calls[0].amount, 2500);
    assert_eq!(calls[0].currency.as_str(), "USD");
    assert_eq!(calls[0].receipt, "rcpt_7");
    assert_eq!(calls[0].notes.get("cart").map(String::as_str), Some("c-1"));
}

#[tokio::test]
async fn create_order_rejects_bad_amounts_without_gateway_call() {
    let gateway = Arc::new(FakeGateway::default());
    let server = server(gateway.clone());

    for body in [
        json!({}),
        json!({ "amount": 0 }),
        json!({ "amount": -3 }),
        json!({ "amount": "abc" }),
        json!({ "amount": true }),
    ] {
        let response = server
            .post("/order/create")
            .authorization_bearer(TOKEN)
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false, "body {}", body);
    }

    assert!(gateway.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_order_forwards_gateway_errors() {
    let gateway = Arc::new(FakeGateway {
        fail: true,
        ..Default::default()
    });
    let server = server(gateway);

    let response = server
        .post("/order/create")
        .authorization_bearer(TOKEN)
        .json(&json!({ "amount": 10 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Authentication failed");
    assert_eq!(body["error"]["code"], "BAD_REQUEST_ERROR");
}

#[tokio::test]
async fn create_order_without_credentials_is_500() {
    let server = server_with(PaymentService::without_gateway(RazorpayConfig::empty()));

    let response = server
        .post("/order/create")
        .authorization_bearer(TOKEN)
        .json(&json!({ "amount": 10 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["success"], false);
}

#[tokio::test]
async fn verify_accepts_valid_signature() {
    let server = server(Arc::new(FakeGateway::default()));
    let signature = expected_payment_signature(SECRET, "order_abc", "pay_xyz").unwrap();
    assert_eq!(
        signature,
        "ee21698235c31aef5bb049b86d1c00014db7de75dbe78cb4ed9ffa8e90855655"
    );

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "razorpay_order_id": "order_abc",
            "razorpay_payment_id": "pay_xyz",
            "razorpay_signature": signature
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "message": "Payment verified successfully",
            "paymentId": "pay_xyz",
            "orderId": "order_abc"
        })
    );
}

#[tokio::test]
async fn verify_rejects_tampered_signature() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "razorpay_order_id": "order_abc",
            "razorpay_payment_id": "pay_xyz",
            "razorpay_signature": "a".repeat(64)
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Payment verification failed" })
    );
}

#[tokio::test]
async fn verify_requires_all_fields() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "razorpay_order_id": "order_abc",
            "razorpay_signature": "abc"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing payment verification data"
    );
}

#[tokio::test]
async fn verify_without_secret_is_500_even_for_bad_input() {
    let server = server_with(PaymentService::without_gateway(
        RazorpayConfig::empty().with_key_id(KEY_ID),
    ));

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing Razorpay key secret on server"
    );
}

#[tokio::test]
async fn verify_null_fields_without_secret_is_500() {
    let server = server_with(PaymentService::without_gateway(
        RazorpayConfig::empty().with_key_id(KEY_ID),
    ));

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "razorpay_order_id": null,
            "razorpay_payment_id": null,
            "razorpay_signature": null
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing Razorpay key secret on server"
    );
}

#[tokio::test]
async fn verify_null_fields_are_missing_data() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({
            "razorpay_order_id": "order_abc",
            "razorpay_payment_id": null,
            "razorpay_signature": null
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing payment verification data"
    );
}

#[tokio::test]
async fn malformed_json_is_400() {
    let server = server(Arc::new(FakeGateway::default()));

    let response = server
        .post("/order/verify")
        .authorization_bearer(TOKEN)
        .json(&json!({ "razorpay_order_id": 42 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], false);
}
