//! Donation flow
//!
//! `submit` validates a donation, opens a payment intent, and records the
//! donation as pending. `settle` applies a payment provider event to the
//! matching donation exactly once.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{DonationCreate, DonationRequest, DonationStatus};

use crate::error::ServiceResult;
use crate::payment::{IntentRequest, PaymentAuthority, PaymentError, PaymentEvent, to_minor_units};
use crate::store::{MemStore, StoreError};

/// What the donate page needs to confirm the payment in the browser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub donation_id: u64,
}

/// Result of applying a payment event
#[derive(Debug, Clone, PartialEq)]
pub enum SettleOutcome {
    /// Pending donation moved to its final status
    Settled { id: u64, status: DonationStatus },
    /// Replay of an event already applied
    AlreadySettled { id: u64, status: DonationStatus },
    /// Donation already holds a different final status; left untouched
    Conflict {
        id: u64,
        current: DonationStatus,
        requested: DonationStatus,
    },
    /// No donation carries this payment reference
    UnknownReference,
    /// Event kind the donation flow does not act on
    Ignored,
}

#[derive(Clone)]
pub struct DonationService {
    store: Arc<MemStore>,
    payments: Arc<dyn PaymentAuthority>,
    currency: String,
    description: String,
    payment_timeout: Duration,
}

impl DonationService {
    pub fn new(
        store: Arc<MemStore>,
        payments: Arc<dyn PaymentAuthority>,
        currency: impl Into<String>,
        description: impl Into<String>,
        payment_timeout: Duration,
    ) -> Self {
        Self {
            store,
            payments,
            currency: currency.into(),
            description: description.into(),
            payment_timeout,
        }
    }

    /// Validate, open a payment intent, then persist a pending donation.
    ///
    /// Nothing is stored unless the payment provider issued an intent. The
    /// provider call is made once and bounded by the configured timeout.
    pub async fn submit(&self, request: DonationRequest) -> ServiceResult<DonationReceipt> {
        let input = request.into_input()?;

        let amount_minor = to_minor_units(input.amount)
            .map_err(|e| AppError::validation(format!("Validation failed: amount: {e}")))?;

        let mut metadata = BTreeMap::new();
        metadata.insert("name".to_string(), input.name.clone());
        metadata.insert("email".to_string(), input.email.clone());
        metadata.insert("message".to_string(), input.message.clone());
        metadata.insert("donation_type".to_string(), "one_time".to_string());

        let intent_request = IntentRequest {
            amount_minor,
            currency: self.currency.clone(),
            description: self.description.clone(),
            receipt_email: Some(input.email.clone()),
            metadata,
        };

        tracing::info!(amount_minor, currency = %self.currency, "Creating payment intent");

        let intent = tokio::time::timeout(
            self.payment_timeout,
            self.payments.create_intent(&intent_request),
        )
        .await
        .map_err(|_| PaymentError::Timeout)??;

        let donation = self.store.donations.create(DonationCreate {
            name: input.name,
            email: input.email,
            amount: input.amount,
            message: input.message,
            external_reference: intent.reference.clone(),
            metadata: Some(serde_json::json!({
                "donationType": "one_time",
                "currency": self.currency,
            })),
        })?;

        tracing::info!(
            donation_id = donation.id,
            payment_intent = %intent.reference,
            "Donation recorded as pending"
        );

        Ok(DonationReceipt {
            client_secret: intent.client_secret,
            payment_intent_id: intent.reference,
            donation_id: donation.id,
        })
    }

    /// Apply a payment event. Replays, unknown references, and conflicting
    /// outcomes are reported, not treated as errors.
    pub fn settle(&self, event: &PaymentEvent) -> ServiceResult<SettleOutcome> {
        let (reference, requested) = match event {
            PaymentEvent::Succeeded { reference } => (reference, DonationStatus::Completed),
            PaymentEvent::PaymentFailed { reference, reason } => {
                tracing::info!(
                    payment_intent = %reference,
                    reason = reason.as_deref().unwrap_or("unspecified"),
                    "Payment failed"
                );
                (reference, DonationStatus::Failed)
            }
            PaymentEvent::Canceled { reference } => (reference, DonationStatus::Failed),
            PaymentEvent::Unhandled { kind } => {
                tracing::debug!(event_type = %kind, "Ignoring payment event");
                return Ok(SettleOutcome::Ignored);
            }
        };

        let Some(donation) = self.store.donations.find_by_reference(reference) else {
            tracing::warn!(payment_intent = %reference, "No donation for payment reference");
            return Ok(SettleOutcome::UnknownReference);
        };

        match self.store.donations.update_status(donation.id, requested) {
            Ok(updated) => {
                tracing::info!(
                    donation_id = updated.id,
                    status = %updated.status,
                    "Donation settled"
                );
                Ok(SettleOutcome::Settled {
                    id: updated.id,
                    status: updated.status,
                })
            }
            Err(StoreError::InvalidTransition { id, from, .. }) if from == requested => {
                tracing::info!(donation_id = id, status = %from, "Duplicate payment event");
                Ok(SettleOutcome::AlreadySettled { id, status: from })
            }
            Err(StoreError::InvalidTransition { id, from, to }) => {
                tracing::warn!(
                    donation_id = id,
                    current = %from,
                    requested = %to,
                    "Conflicting payment event, donation left unchanged"
                );
                Ok(SettleOutcome::Conflict {
                    id,
                    current: from,
                    requested: to,
                })
            }
            Err(e) => {
                // Reference index points at a record the store no longer holds
                tracing::error!(
                    donation_id = donation.id,
                    error = %e,
                    "Donation lookup inconsistent during settlement"
                );
                Err(AppError::new(ErrorCode::InternalError).into())
            }
        }
    }
}
