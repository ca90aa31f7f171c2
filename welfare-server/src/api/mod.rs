//! HTTP API
//!
//! Every form endpoint lives under `/api`; `/health` stays at the root.

pub mod contact;
pub mod donations;
pub mod extract;
pub mod health;
pub mod subscribe;
pub mod webhook;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// UUID v4 request id generator
#[derive(Clone, Copy)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Routes mounted under `/api`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::create).get(contact::list))
        .route("/subscribe", post(subscribe::subscribe))
        .route("/subscriptions", get(subscribe::list))
        .route(
            "/create-payment-intent",
            post(donations::create_payment_intent),
        )
        .route("/donations", get(donations::list))
        .route("/donations/{id}", get(donations::get_by_id))
        // Raw body, signature is computed over the exact bytes
        .route("/webhook", post(webhook::handle_webhook))
}

/// Build the application router with middleware and state
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Propagate must sit inside Set so a generated id reaches the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
