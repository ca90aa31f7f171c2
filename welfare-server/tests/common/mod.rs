// Shared by several test files that each use a subset.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::response::Response;
use hmac::{Hmac, Mac};
use http::header::CONTENT_TYPE;
use http::{Request, request};
use http_body_util::BodyExt;
use sha2::Sha256;
use tower::ServiceExt;

use welfare_server::payment::{IntentRequest, IssuedIntent, PaymentAuthority, PaymentError};
use welfare_server::{AppState, Config, api};

pub const WEBHOOK_SECRET: &str = "whsec_test";

/// Payment authority double that records every intent request
#[derive(Default)]
pub struct FakeAuthority {
    pub calls: Mutex<Vec<IntentRequest>>,
    pub fail: bool,
}

impl FakeAuthority {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentAuthority for FakeAuthority {
    async fn create_intent(&self, request: &IntentRequest) -> Result<IssuedIntent, PaymentError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            calls.len()
        };
        if self.fail {
            return Err(PaymentError::Rejected {
                status: 401,
                message: "Invalid API Key provided".into(),
            });
        }
        Ok(IssuedIntent {
            reference: format!("pi_test_{n}"),
            client_secret: format!("pi_test_{n}_secret_abc"),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub authority: Arc<FakeAuthority>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(FakeAuthority::default(), None)
    }

    pub fn with_webhook_secret() -> Self {
        Self::build(FakeAuthority::default(), Some(WEBHOOK_SECRET))
    }

    pub fn with_authority(authority: FakeAuthority) -> Self {
        Self::build(authority, None)
    }

    fn build(authority: FakeAuthority, webhook_secret: Option<&str>) -> Self {
        let config = Config {
            stripe_webhook_secret: webhook_secret.map(str::to_string),
            ..Config::default()
        };
        let authority = Arc::new(authority);
        let state = AppState::with_payment_authority(&config, authority.clone());
        Self {
            router: api::create_router(state.clone()),
            state,
            authority,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub trait RequestBuilderExt {
    fn json(self, json: serde_json::Value) -> Request<Body>;

    fn empty_body(self) -> Request<Body>;
}

impl RequestBuilderExt for request::Builder {
    fn json(self, json: serde_json::Value) -> Request<Body> {
        self.header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request")
    }

    fn empty_body(self) -> Request<Body> {
        self.body(Body::empty()).expect("failed to build request")
    }
}

pub async fn response_json(resp: Response) -> serde_json::Value {
    assert_eq!(
        resp.headers()
            .get(CONTENT_TYPE)
            .expect("expected Content-Type"),
        "application/json"
    );
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("error reading response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("failed to read response body as json")
}

/// Build a `Stripe-Signature` header for `payload`
pub fn sign(payload: &str, secret: &str, timestamp: i64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload.as_bytes());
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}

pub fn intent_event(kind: &str, reference: &str) -> String {
    serde_json::json!({
        "id": "evt_test",
        "type": kind,
        "data": { "object": { "id": reference } }
    })
    .to_string()
}

pub fn webhook_request(payload: String, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::post("/api/webhook").header(CONTENT_TYPE, "application/json");
    if let Some(sig) = signature {
        builder = builder.header("stripe-signature", sig);
    }
    builder.body(Body::from(payload)).expect("failed to build request")
}
