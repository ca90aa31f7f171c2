//! Payment provider webhook
//!
//! POST /api/webhook receives the raw body so the signature can be checked
//! over the exact bytes. Every well-formed event is acknowledged with 200,
//! including replays and events for unknown payment references.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use http::HeaderMap;
use shared::error::{AppError, ErrorCode};

use crate::error::ServiceResult;
use crate::payment::{PaymentEvent, verify_webhook_signature};
use crate::services::SettleOutcome;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "stripe-signature";

pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ServiceResult<Json<serde_json::Value>> {
    if let Some(secret) = &state.webhook_secret {
        let Some(sig_header) = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
        else {
            tracing::warn!("Missing Stripe-Signature header");
            return Err(AppError::with_message(
                ErrorCode::WebhookSignatureInvalid,
                "Missing webhook signature",
            )
            .into());
        };

        let now = chrono::Utc::now().timestamp();
        if let Err(e) = verify_webhook_signature(&body, sig_header, secret, now) {
            tracing::warn!(error = %e, "Webhook signature verification failed");
            return Err(AppError::new(ErrorCode::WebhookSignatureInvalid).into());
        }
    }

    let event = PaymentEvent::parse(&body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        AppError::with_message(ErrorCode::WebhookPayloadInvalid, e.to_string())
    })?;

    tracing::info!(event_type = event.kind(), "Received payment webhook");

    match state.donations.settle(&event)? {
        SettleOutcome::Settled { id, status } => {
            tracing::debug!(donation_id = id, status = %status, "Webhook applied");
        }
        outcome => {
            tracing::debug!(?outcome, "Webhook acknowledged without change");
        }
    }

    Ok(Json(serde_json::json!({ "received": true })))
}
