//! Contact Message Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::{MAX_EMAIL_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN, trim_field};

/// Contact message entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Visitor agreed to be contacted back
    pub contact_preference: bool,
    pub created_at: DateTime<Utc>,
}

/// Create contact message payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub contact_preference: bool,
}

/// Contact form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(
        required(message = "Name is required"),
        length(max = MAX_NAME_LEN, message = "Name is too long")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Valid email is required"),
        email(message = "Valid email is required"),
        length(max = MAX_EMAIL_LEN, message = "Valid email is required")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Subject is required"),
        length(max = MAX_NAME_LEN, message = "Subject is too long")
    )]
    pub subject: Option<String>,
    #[validate(
        required(message = "Message is required"),
        length(max = MAX_MESSAGE_LEN, message = "Message is too long")
    )]
    pub message: Option<String>,
    pub contact_preference: Option<bool>,
}

impl ContactRequest {
    pub fn into_create(self) -> Result<ContactCreate, ValidationErrors> {
        let request = Self {
            name: trim_field(self.name),
            email: trim_field(self.email),
            subject: trim_field(self.subject),
            message: trim_field(self.message),
            contact_preference: self.contact_preference,
        };
        request.validate()?;

        Ok(ContactCreate {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            subject: request.subject.unwrap_or_default(),
            message: request.message.unwrap_or_default(),
            contact_preference: request.contact_preference.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_preference_defaults_to_false() {
        let req: ContactRequest = serde_json::from_str(
            r#"{"name":"Ann","email":"ann@x.com","subject":"Hi","message":"Hello"}"#,
        )
        .unwrap();
        let create = req.into_create().unwrap();
        assert!(!create.contact_preference);
        assert_eq!(create.subject, "Hi");
    }

    #[test]
    fn test_contact_preference_camel_case() {
        let req: ContactRequest = serde_json::from_str(
            r#"{"name":"Ann","email":"ann@x.com","subject":"Hi","message":"Hello","contactPreference":true}"#,
        )
        .unwrap();
        assert!(req.into_create().unwrap().contact_preference);
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let errors = ContactRequest::default().into_create().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "email", "subject", "message"] {
            assert!(fields.contains_key(field), "missing {field}");
        }
    }
}
