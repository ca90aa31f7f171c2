//! Unified error codes for the welfare site backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Donation errors
//! - 2xxx: Payment provider errors
//! - 3xxx: Webhook errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the front end can switch on a number
/// instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Malformed request outside the body (e.g. path parameters)
    InvalidRequest = 5,

    // ==================== 1xxx: Donation ====================
    /// Donation not found
    DonationNotFound = 1001,
    /// Status change out of a terminal state
    DonationInvalidTransition = 1002,
    /// Payment reference already bound to another donation
    DuplicatePaymentReference = 1003,

    // ==================== 2xxx: Payment ====================
    /// Payment provider rejected or could not be reached
    PaymentProviderError = 2001,
    /// Payment provider did not answer in time
    PaymentProviderTimeout = 2002,

    // ==================== 3xxx: Webhook ====================
    /// Webhook signature missing or invalid
    WebhookSignatureInvalid = 3001,
    /// Webhook payload could not be parsed
    WebhookPayloadInvalid = 3002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",

            // Donation
            ErrorCode::DonationNotFound => "Donation not found",
            ErrorCode::DonationInvalidTransition => "Donation is already settled",
            ErrorCode::DuplicatePaymentReference => "Payment reference is already recorded",

            // Payment
            ErrorCode::PaymentProviderError => "Payment could not be processed",
            ErrorCode::PaymentProviderTimeout => "Payment provider did not respond in time",

            // Webhook
            ErrorCode::WebhookSignatureInvalid => "Webhook signature is invalid",
            ErrorCode::WebhookPayloadInvalid => "Webhook payload is invalid",

            // System
            ErrorCode::InternalError => "An unexpected error occurred",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),

            // Donation
            1001 => Ok(ErrorCode::DonationNotFound),
            1002 => Ok(ErrorCode::DonationInvalidTransition),
            1003 => Ok(ErrorCode::DuplicatePaymentReference),

            // Payment
            2001 => Ok(ErrorCode::PaymentProviderError),
            2002 => Ok(ErrorCode::PaymentProviderTimeout),

            // Webhook
            3001 => Ok(ErrorCode::WebhookSignatureInvalid),
            3002 => Ok(ErrorCode::WebhookPayloadInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
