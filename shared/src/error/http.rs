//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::DonationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::DonationInvalidTransition => StatusCode::CONFLICT,

            // 500 Internal Server Error (payment failures are surfaced, never retried)
            Self::PaymentProviderError
            | Self::PaymentProviderTimeout
            | Self::DuplicatePaymentReference
            | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation, malformed bodies, bad webhooks)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::WebhookSignatureInvalid
            | Self::WebhookPayloadInvalid => StatusCode::BAD_REQUEST,
        }
    }
}
