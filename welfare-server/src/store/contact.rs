//! Contact messages

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use shared::models::{ContactCreate, ContactMessage};

#[derive(Debug)]
pub struct ContactStore {
    next_id: AtomicU64,
    records: DashMap<u64, ContactMessage>,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            records: DashMap::new(),
        }
    }

    pub fn save(&self, data: ContactCreate) -> ContactMessage {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = ContactMessage {
            id,
            name: data.name,
            email: data.email,
            subject: data.subject,
            message: data.message,
            contact_preference: data.contact_preference,
            created_at: Utc::now(),
        };
        self.records.insert(id, message.clone());
        message
    }

    pub fn list(&self) -> Vec<ContactMessage> {
        let mut all: Vec<ContactMessage> =
            self.records.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|m| m.id);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_list() {
        let store = ContactStore::new();
        let first = store.save(ContactCreate {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            subject: "Volunteering".into(),
            message: "How can I help?".into(),
            contact_preference: true,
        });
        let second = store.save(ContactCreate {
            name: "Bo".into(),
            email: "bo@x.com".into(),
            subject: "Events".into(),
            message: "Next meetup?".into(),
            contact_preference: false,
        });

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list(), vec![first, second]);
    }
}
