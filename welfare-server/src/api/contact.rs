//! Contact form

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::{ContactMessage, ContactRequest};

use super::extract::AppJson;
use crate::state::AppState;
use crate::validation::validation_error;

/// POST /api/contact
pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ContactMessage>>)> {
    let data = request.into_create().map_err(|e| validation_error(&e))?;
    let saved = state.store.contacts.save(data);
    tracing::info!(contact_id = saved.id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Contact message received",
            saved,
        )),
    ))
}

/// GET /api/contact
pub async fn list(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "contacts": state.store.contacts.list() }))
}
