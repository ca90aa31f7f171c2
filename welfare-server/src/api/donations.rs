//! Donation endpoints

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use shared::error::AppError;
use shared::models::{Donation, DonationRequest};

use super::extract::AppJson;
use crate::error::{ServiceError, ServiceResult};
use crate::services::DonationReceipt;
use crate::state::AppState;
use crate::store::StoreError;

/// POST /api/create-payment-intent
pub async fn create_payment_intent(
    State(state): State<AppState>,
    AppJson(request): AppJson<DonationRequest>,
) -> ServiceResult<Json<DonationReceipt>> {
    let receipt = state.donations.submit(request).await?;
    Ok(Json(receipt))
}

/// GET /api/donations
pub async fn list(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "donations": state.store.donations.list() }))
}

/// GET /api/donations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ServiceResult<Json<Donation>> {
    let Path(id) = id.map_err(|rejection| {
        AppError::invalid_request(format!("Invalid donation id: {}", rejection.body_text()))
    })?;
    state
        .store
        .donations
        .get(id)
        .map(Json)
        .ok_or(ServiceError::Store(StoreError::NotFound(id)))
}
