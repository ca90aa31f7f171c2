//! Webhook event parsing
//!
//! Payment provider notifications are parsed into [`PaymentEvent`] instead of
//! being read field-by-field out of an untyped JSON value. Kinds the donation
//! flow does not act on still parse (as `Unhandled`) as long as the envelope
//! is well formed.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    /// `payment_intent.succeeded`
    Succeeded { reference: String },
    /// `payment_intent.payment_failed`
    PaymentFailed {
        reference: String,
        reason: Option<String>,
    },
    /// `payment_intent.canceled`
    Canceled { reference: String },
    /// Any other event kind
    Unhandled { kind: String },
}

#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("malformed event envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("{kind} event missing payment intent id")]
    MissingReference { kind: String },

    #[error("malformed {kind} payment intent: {source}")]
    Object {
        kind: String,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    data: EnvelopeData,
}

#[derive(Deserialize)]
struct EnvelopeData {
    object: serde_json::Value,
}

#[derive(Deserialize)]
struct IntentObject {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    last_payment_error: Option<LastPaymentError>,
}

#[derive(Deserialize)]
struct LastPaymentError {
    message: Option<String>,
}

impl PaymentEvent {
    pub fn parse(body: &[u8]) -> Result<Self, EventParseError> {
        let envelope: Envelope = serde_json::from_slice(body)?;
        let kind = envelope.kind;

        let intent = |kind: &str| -> Result<(String, IntentObject), EventParseError> {
            let mut object: IntentObject = serde_json::from_value(envelope.data.object.clone())
                .map_err(|source| EventParseError::Object {
                    kind: kind.to_string(),
                    source,
                })?;
            let id = object
                .id
                .take()
                .ok_or_else(|| EventParseError::MissingReference {
                    kind: kind.to_string(),
                })?;
            Ok((id, object))
        };

        let event = match kind.as_str() {
            "payment_intent.succeeded" => PaymentEvent::Succeeded {
                reference: intent(&kind)?.0,
            },
            "payment_intent.payment_failed" => {
                let (reference, object) = intent(&kind)?;
                PaymentEvent::PaymentFailed {
                    reference,
                    reason: object.last_payment_error.and_then(|e| e.message),
                }
            }
            "payment_intent.canceled" => PaymentEvent::Canceled {
                reference: intent(&kind)?.0,
            },
            _ => PaymentEvent::Unhandled { kind: kind.clone() },
        };
        Ok(event)
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Succeeded { .. } => "payment_intent.succeeded",
            Self::PaymentFailed { .. } => "payment_intent.payment_failed",
            Self::Canceled { .. } => "payment_intent.canceled",
            Self::Unhandled { kind } => kind,
        }
    }
}
