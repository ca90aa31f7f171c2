//! In-memory data store
//!
//! Stands in for a database. One [`MemStore`] is built at startup and shared
//! through the application state; tests build their own isolated instances.

mod contact;
mod donation;
mod error;
mod subscription;

pub use contact::ContactStore;
pub use donation::DonationStore;
pub use error::{StoreError, StoreResult};
pub use subscription::SubscriptionStore;

#[derive(Debug, Default)]
pub struct MemStore {
    pub donations: DonationStore,
    pub contacts: ContactStore,
    pub subscriptions: SubscriptionStore,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}
