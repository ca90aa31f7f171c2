//! welfare-server: contact, newsletter, and donation backend
//!
//! - Contact form and newsletter signup with field validation
//! - One-time donations through a hosted payment intent flow
//! - Webhook settlement of pending donations, applied exactly once
//! - In-memory record store

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod payment;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
