//! Validation error reporting
//!
//! Turns `validator` output into a single `ValidationFailed` error whose
//! message names every violated field and whose `details.errors` lists them
//! as `{field, message}` pairs, sorted by field.

use serde_json::json;
use shared::error::AppError;
use validator::ValidationErrors;

/// One violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

pub fn violations(errors: &ValidationErrors) -> Vec<Violation> {
    let mut out: Vec<Violation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| Violation {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
            })
        })
        .collect();
    out.sort();
    out.dedup();
    out
}

pub fn validation_error(errors: &ValidationErrors) -> AppError {
    let violations = violations(errors);
    let summary = violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ");
    let details: Vec<serde_json::Value> = violations
        .iter()
        .map(|v| json!({ "field": v.field, "message": v.message }))
        .collect();

    AppError::validation(format!("Validation failed: {summary}")).with_detail("errors", details)
}
