//! Donation Model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, trim_field};

/// Smallest accepted donation, in currency units
pub const MIN_DONATION: Decimal = Decimal::ONE;

/// Largest accepted donation, in currency units
pub const MAX_DONATION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Decimal places an amount may carry (whole cents)
pub const AMOUNT_SCALE: u32 = 2;

/// Donation lifecycle status
///
/// `Pending` is the only non-terminal state. Settlement moves a donation to
/// `Completed` or `Failed` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Completed,
    Failed,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether a donation in this status may be moved to `next`.
    ///
    /// Only `Pending -> Completed` and `Pending -> Failed` are allowed.
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Donation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub amount: Decimal,
    pub message: String,
    /// Payment intent id issued by the payment provider
    pub external_reference: String,
    pub status: DonationStatus,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create donation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationCreate {
    pub name: String,
    pub email: String,
    pub amount: Decimal,
    pub message: String,
    pub external_reference: String,
    pub metadata: Option<serde_json::Value>,
}

/// Donation form as submitted by the donate page
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DonationRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 2, max = MAX_NAME_LEN, message = "Name is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Valid email is required"),
        email(message = "Valid email is required"),
        length(max = MAX_EMAIL_LEN, message = "Valid email is required")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Amount is required"),
        custom(function = "validate_amount")
    )]
    pub amount: Option<Decimal>,
    #[validate(length(max = MAX_NOTE_LEN, message = "Message is too long"))]
    pub message: Option<String>,
}

/// A donation request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct DonationInput {
    pub name: String,
    pub email: String,
    pub amount: Decimal,
    /// Empty when the donor left no message
    pub message: String,
}

impl DonationRequest {
    /// Trim, validate, and normalize the request.
    ///
    /// Every violated constraint is reported, not just the first one.
    pub fn into_input(self) -> Result<DonationInput, ValidationErrors> {
        let request = Self {
            name: trim_field(self.name),
            email: trim_field(self.email),
            amount: self.amount,
            message: trim_field(self.message),
        };
        request.validate()?;

        Ok(DonationInput {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            amount: request.amount.unwrap_or_default().normalize(),
            message: request.message.unwrap_or_default(),
        })
    }
}

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(amount_error("amount_positive", "Amount must be positive"));
    }
    if *amount < MIN_DONATION {
        return Err(amount_error(
            "amount_minimum",
            "Minimum donation amount is $1",
        ));
    }
    if *amount > MAX_DONATION {
        return Err(amount_error(
            "amount_maximum",
            "Maximum donation amount exceeded",
        ));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(amount_error(
            "amount_precision",
            "Amount must be in whole cents",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request(name: &str, email: &str, amount: Option<&str>) -> DonationRequest {
        DonationRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            amount: amount.map(|a| Decimal::from_str(a).unwrap()),
            message: None,
        }
    }

    #[test]
    fn test_valid_request_normalizes() {
        let input = request("  Ann ", "ann@x.com", Some("25.00"))
            .into_input()
            .unwrap();
        assert_eq!(input.name, "Ann");
        assert_eq!(input.email, "ann@x.com");
        assert_eq!(input.amount.to_string(), "25");
        assert_eq!(input.message, "");
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        for amount in ["0", "-5"] {
            let errors = request("Ann", "ann@x.com", Some(amount))
                .into_input()
                .unwrap_err();
            let fields = errors.field_errors();
            let amount_errors = fields.get("amount").unwrap();
            assert_eq!(amount_errors[0].code, "amount_positive");
        }
    }

    #[test]
    fn test_sub_minimum_amount_rejected() {
        let errors = request("Ann", "ann@x.com", Some("0.50"))
            .into_input()
            .unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.get("amount").unwrap()[0].code, "amount_minimum");
    }

    #[test]
    fn test_amount_above_cap_rejected() {
        let errors = request("Ann", "ann@x.com", Some("1000000.01"))
            .into_input()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_sub_cent_amount_rejected() {
        let errors = request("Ann", "ann@x.com", Some("10.005"))
            .into_input()
            .unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.get("amount").unwrap()[0].code, "amount_precision");

        // Trailing zeros beyond the cent are not extra precision
        let input = request("Ann", "ann@x.com", Some("10.5000"))
            .into_input()
            .unwrap();
        assert_eq!(input.amount.to_string(), "10.5");
    }

    #[test]
    fn test_name_length_bounds() {
        let errors = request("A", "ann@x.com", Some("5")).into_input().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let long = "a".repeat(MAX_NAME_LEN as usize + 1);
        let errors = request(&long, "ann@x.com", Some("5")).into_input().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let max = "a".repeat(MAX_NAME_LEN as usize);
        assert!(request(&max, "ann@x.com", Some("5")).into_input().is_ok());
    }

    #[test]
    fn test_every_violation_reported() {
        let errors = request(" ", "not-an-email", None).into_input().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("amount"));
    }

    #[test]
    fn test_amount_accepts_number_and_string_json() {
        let from_number: DonationRequest =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@x.com","amount":25}"#).unwrap();
        let from_string: DonationRequest =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@x.com","amount":"25"}"#).unwrap();
        assert_eq!(from_number.amount, from_string.amount);
    }

    #[test]
    fn test_status_transitions() {
        use DonationStatus::*;
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Pending));
        assert!(Completed.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_donation_serializes_amount_as_string() {
        let now = Utc::now();
        let donation = Donation {
            id: 1,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            amount: Decimal::from(25),
            message: String::new(),
            external_reference: "pi_123".into(),
            status: DonationStatus::Pending,
            metadata: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&donation).unwrap();
        assert_eq!(json["amount"], "25");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["externalReference"], "pi_123");
    }
}
