//! Newsletter subscriptions
//!
//! Signing up twice with the same address (case-insensitive) returns the
//! original subscription instead of creating another one.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use shared::models::Subscription;

#[derive(Debug)]
pub struct SubscriptionStore {
    next_id: AtomicU64,
    /// lowercased email -> subscription
    by_email: DashMap<String, Subscription>,
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            by_email: DashMap::new(),
        }
    }

    /// Subscribe `email`, returning `(subscription, created)`.
    pub fn subscribe(&self, email: &str) -> (Subscription, bool) {
        let mut created = false;
        let subscription = self
            .by_email
            .entry(email.to_lowercase())
            .or_insert_with(|| {
                created = true;
                Subscription {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    email: email.to_string(),
                    subscribed_at: Utc::now(),
                }
            })
            .clone();
        (subscription, created)
    }

    pub fn list(&self) -> Vec<Subscription> {
        let mut all: Vec<Subscription> = self.by_email.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|s| s.id);
        all
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}
