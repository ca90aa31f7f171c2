//! Payment provider integration
//!
//! The donation flow only talks to [`PaymentAuthority`]. Production uses
//! [`StripeClient`]; tests plug in a fake.

mod event;
mod money;
mod stripe;

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

pub use event::{EventParseError, PaymentEvent};
pub use money::{MinorUnitsError, to_minor_units};
pub use stripe::{SignatureError, StripeClient, verify_webhook_signature};

/// Request to open a payment intent
#[derive(Debug, Clone, PartialEq)]
pub struct IntentRequest {
    /// Amount in minor currency units (cents)
    pub amount_minor: i64,
    /// Lowercase ISO currency code
    pub currency: String,
    pub description: String,
    pub receipt_email: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Payment intent issued by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedIntent {
    /// Provider-side intent id, the donation's external reference
    pub reference: String,
    /// Token the browser uses to confirm the payment
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider timed out")]
    Timeout,

    #[error("payment provider unreachable: {0}")]
    Transport(String),

    #[error("payment provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed payment provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PaymentError::Timeout
        } else if e.is_decode() {
            PaymentError::MalformedResponse(e.to_string())
        } else {
            PaymentError::Transport(e.to_string())
        }
    }
}

/// Third-party service that authorizes and settles charges
#[async_trait]
pub trait PaymentAuthority: Send + Sync {
    /// Open a payment intent. Never retried by callers.
    async fn create_intent(&self, request: &IntentRequest) -> Result<IssuedIntent, PaymentError>;
}
