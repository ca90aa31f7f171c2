//! Service-layer error type
//!
//! `ServiceError` bridges store, payment provider, and validation failures
//! to the API-layer `AppError`, so services can use `?` and handlers get a
//! consistent response. Infrastructure failures are logged here and reach
//! the client only as a generic message.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use validator::ValidationErrors;

use crate::payment::PaymentError;
use crate::store::StoreError;
use crate::validation::validation_error;

#[derive(Debug)]
pub enum ServiceError {
    /// In-memory store rejected the operation
    Store(StoreError),
    /// Payment provider call failed (never retried)
    Payment(PaymentError),
    /// Already an AppError with the right ErrorCode
    App(AppError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<PaymentError> for ServiceError {
    fn from(e: PaymentError) -> Self {
        ServiceError::Payment(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(e: ValidationErrors) -> Self {
        ServiceError::App(validation_error(&e))
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(StoreError::NotFound(id)) => AppError::with_message(
                ErrorCode::DonationNotFound,
                format!("Donation {id} not found"),
            ),
            ServiceError::Store(err @ StoreError::InvalidTransition { .. }) => {
                AppError::with_message(ErrorCode::DonationInvalidTransition, err.to_string())
            }
            ServiceError::Store(err @ StoreError::DuplicateReference(_)) => {
                tracing::error!(error = %err, "Payment reference collision");
                AppError::new(ErrorCode::DuplicatePaymentReference)
            }
            ServiceError::Payment(PaymentError::Timeout) => {
                tracing::error!("Payment provider timed out");
                AppError::new(ErrorCode::PaymentProviderTimeout)
            }
            ServiceError::Payment(err) => {
                tracing::error!(error = %err, "Payment provider error");
                AppError::new(ErrorCode::PaymentProviderError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use shared::models::DonationStatus;

    #[test]
    fn test_store_errors_map_to_codes() {
        let err: AppError = ServiceError::from(StoreError::NotFound(4)).into();
        assert_eq!(err.code, ErrorCode::DonationNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = ServiceError::from(StoreError::InvalidTransition {
            id: 1,
            from: DonationStatus::Completed,
            to: DonationStatus::Failed,
        })
        .into();
        assert_eq!(err.code, ErrorCode::DonationInvalidTransition);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_payment_errors_do_not_leak_detail() {
        let err: AppError = ServiceError::from(PaymentError::Rejected {
            status: 402,
            message: "sk_live_... key leaked".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::PaymentProviderError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("sk_live"));

        let err: AppError = ServiceError::from(PaymentError::Timeout).into();
        assert_eq!(err.code, ErrorCode::PaymentProviderTimeout);
    }
}
