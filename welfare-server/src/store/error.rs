//! Store errors

use shared::models::DonationStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("donation {0} not found")]
    NotFound(u64),

    #[error("donation {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: u64,
        from: DonationStatus,
        to: DonationStatus,
    },

    #[error("payment reference {0} is already recorded")]
    DuplicateReference(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
