//! Shared input validation helpers.
//!
//! Field-level rules (length caps, email format) are declared with
//! `validator` derives on the request types; [`check`] turns their errors into
//! a single [`CoreError::Validation`]. The remaining helpers cover rules the
//! derive cannot express: trimming, date parsing and required text.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use validator::{Validate, ValidateEmail, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Run `validator` rules on `input`, collecting every failure.
pub fn check<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(flatten_errors(&errors)))
}

/// Render validation errors as `"field: message, field: message"`,
/// sorted by field name so messages are stable.
pub fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(list) = kind {
            for error in list {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed `{}` check", error.code));
                messages.push(format!("{field}: {message}"));
            }
        }
    }
    messages.sort();
    messages.join(", ")
}

/// Trim `value`, rejecting it when nothing is left.
pub fn require_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Trim an optional value; blank strings count as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "\"email\" must be a valid email".into(),
        ))
    }
}

/// Parse a date or timestamp supplied by a client.
///
/// Accepts RFC 3339 (`2025-07-01T08:00:00Z`), a naive timestamp
/// (`2025-07-01T08:00:00`, read as UTC) or a plain date (`2025-07-01`,
/// midnight UTC).
pub fn parse_date(field: &str, value: &str) -> Result<Timestamp, CoreError> {
    let value = value.trim();

    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(CoreError::Validation(format!(
        "{field} must be a valid date"
    )))
}

/// Parse an optional date field; blank strings count as absent.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => parse_date(field, v).map(Some),
        _ => Ok(None),
    }
}

/// Parse an integer form field.
pub fn parse_integer(field: &str, value: &str) -> Result<i64, CoreError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("{field} must be an integer")))
}
