//! Shared types for the welfare site backend
//!
//! Domain records, request payloads, and the unified error/response
//! envelope used by the server and any client of its API.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
