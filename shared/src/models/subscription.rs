//! Newsletter Subscription Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::{MAX_EMAIL_LEN, trim_field};

/// Newsletter subscription entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: u64,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

/// Newsletter signup form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(
        required(message = "Valid email is required"),
        email(message = "Valid email is required"),
        length(max = MAX_EMAIL_LEN, message = "Valid email is required")
    )]
    pub email: Option<String>,
}

impl SubscribeRequest {
    /// Validated, trimmed email address
    pub fn into_email(self) -> Result<String, ValidationErrors> {
        let request = Self {
            email: trim_field(self.email),
        };
        request.validate()?;
        Ok(request.email.unwrap_or_default())
    }
}
