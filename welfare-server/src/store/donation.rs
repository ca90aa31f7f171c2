//! Donation records
//!
//! Records live in a `DashMap` keyed by id, with a second map indexing the
//! payment reference. Ids come from an atomic counter so they are unique and
//! increasing without a global lock. Status changes are checked and applied
//! while holding the record's shard lock, which keeps a settled donation
//! settled even when webhooks race.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::models::{Donation, DonationCreate, DonationStatus};

use super::error::{StoreError, StoreResult};

#[derive(Debug)]
pub struct DonationStore {
    next_id: AtomicU64,
    records: DashMap<u64, Donation>,
    by_reference: DashMap<String, u64>,
}

impl Default for DonationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            records: DashMap::new(),
            by_reference: DashMap::new(),
        }
    }

    /// Insert a new pending donation.
    ///
    /// Fails only if the payment reference is already bound to a donation.
    pub fn create(&self, data: DonationCreate) -> StoreResult<Donation> {
        let slot = match self.by_reference.entry(data.external_reference.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::DuplicateReference(data.external_reference));
            }
            Entry::Vacant(slot) => slot,
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let donation = Donation {
            id,
            name: data.name,
            email: data.email,
            amount: data.amount,
            message: data.message,
            external_reference: data.external_reference,
            status: DonationStatus::Pending,
            metadata: data.metadata,
            created_at: now,
            updated_at: now,
        };

        // Record goes in before the index slot is released so a concurrent
        // lookup by reference never sees a dangling id.
        self.records.insert(id, donation.clone());
        slot.insert(id);
        Ok(donation)
    }

    pub fn get(&self, id: u64) -> Option<Donation> {
        self.records.get(&id).map(|r| r.value().clone())
    }

    pub fn find_by_reference(&self, reference: &str) -> Option<Donation> {
        let id = *self.by_reference.get(reference)?;
        self.get(id)
    }

    /// Move a donation to `status`, refreshing `updated_at`.
    ///
    /// Completed and failed donations are terminal: any further change is
    /// rejected with [`StoreError::InvalidTransition`].
    pub fn update_status(&self, id: u64, status: DonationStatus) -> StoreResult<Donation> {
        let mut record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if !record.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                id,
                from: record.status,
                to: status,
            });
        }
        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    /// All donations in creation order
    pub fn list(&self) -> Vec<Donation> {
        let mut all: Vec<Donation> = self.records.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|d| d.id);
        all
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
