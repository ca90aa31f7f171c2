//! Data models
//!
//! Records kept by the server's in-memory store plus the raw request
//! payloads the site's forms submit. Request payloads are all-optional so a
//! single validation pass can report every missing or malformed field.
//! All JSON field names are camelCase.

pub mod contact;
pub mod donation;
pub mod subscription;

// Re-exports
pub use contact::*;
pub use donation::*;
pub use subscription::*;

/// Entity names: donor name, contact name, subject
pub const MAX_NAME_LEN: u64 = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: u64 = 254;

/// Donation notes
pub const MAX_NOTE_LEN: u64 = 500;

/// Contact form body
pub const MAX_MESSAGE_LEN: u64 = 5000;

/// Trim a submitted string; blank input counts as absent.
pub(crate) fn trim_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_field() {
        assert_eq!(trim_field(Some("  Ann ".into())), Some("Ann".to_string()));
        assert_eq!(trim_field(Some("   ".into())), None);
        assert_eq!(trim_field(None), None);
    }
}
