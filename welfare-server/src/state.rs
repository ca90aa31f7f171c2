//! Application state shared by all handlers

use std::sync::Arc;

use crate::config::Config;
use crate::payment::{PaymentAuthority, StripeClient};
use crate::services::DonationService;
use crate::store::MemStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    /// In-memory record store
    pub store: Arc<MemStore>,
    /// Donation submit/settle flow
    pub donations: DonationService,
    /// Webhook signing secret; signatures are not checked when unset
    pub webhook_secret: Option<String>,
    /// Maximum accepted request body size
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build state backed by the Stripe REST API
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let stripe = StripeClient::new(
            &config.stripe_api_base,
            config.stripe_secret_key.clone(),
            config.payment_timeout,
        )?;
        Ok(Self::with_payment_authority(config, Arc::new(stripe)))
    }

    /// Build state around any payment authority
    pub fn with_payment_authority(config: &Config, payments: Arc<dyn PaymentAuthority>) -> Self {
        let store = Arc::new(MemStore::new());
        let donations = DonationService::new(
            store.clone(),
            payments,
            config.currency.clone(),
            config.donation_description.clone(),
            config.payment_timeout,
        );

        Self {
            store,
            donations,
            webhook_secret: config.stripe_webhook_secret.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}
