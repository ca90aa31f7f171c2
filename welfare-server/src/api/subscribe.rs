//! Newsletter signup

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::{SubscribeRequest, Subscription};

use super::extract::AppJson;
use crate::state::AppState;
use crate::validation::validation_error;

/// POST /api/subscribe
///
/// Idempotent: an email that is already subscribed gets its existing record.
pub async fn subscribe(
    State(state): State<AppState>,
    AppJson(request): AppJson<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Subscription>>)> {
    let email = request.into_email().map_err(|e| validation_error(&e))?;
    let (subscription, created) = state.store.subscriptions.subscribe(&email);

    if created {
        tracing::info!(subscription_id = subscription.id, "New newsletter subscription");
    } else {
        tracing::debug!(subscription_id = subscription.id, "Already subscribed");
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Successfully subscribed to newsletter",
            subscription,
        )),
    ))
}

/// GET /api/subscriptions
pub async fn list(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "subscriptions": state.store.subscriptions.list() }))
}
