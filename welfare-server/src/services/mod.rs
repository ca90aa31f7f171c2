//! Business services

pub mod donation;

pub use donation::{DonationReceipt, DonationService, SettleOutcome};
