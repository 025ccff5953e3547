use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_TEXT_LENGTH;
use crate::shared::types::FieldError;

lazy_static! {
    /// Slugs travel in URLs, so they are limited to RFC 3986 unreserved characters
    /// - Valid: "beauty", "smart-watch-series-5", "v1.2_final~draft"
    /// - Invalid: "my slug", "a/b", "caf\u{e9}", "50%"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[A-Za-z0-9._~-]+$").unwrap();
}

/// Run derived validation and convert failures into field-level errors
pub fn validate_payload<T: Validate>(payload: &T) -> Result<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(collect_field_errors(&e)))
}

/// Flatten nested validation errors into `{field, message}` pairs.
///
/// Field names are reported in camelCase (matching the JSON payload), nested
/// structs and lists as dotted/indexed paths like `items[0].price`.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected = Vec::new();
    collect_into(errors, "", &mut collected);
    collected.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    collected
}

fn collect_into(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let name = to_camel_case(&field.to_string());
        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}.{}", prefix, name)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_into(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_into(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Build a validation error carrying a user-facing message
pub fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Names and slugs are stored as `VARCHAR(255)`
pub fn validate_column_length(value: &str) -> std::result::Result<(), ValidationError> {
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(rule_violation("length", "Must be at most 255 characters"));
    }
    Ok(())
}

/// Parse a path id; ids that are not UUIDs cannot exist, so they map to not-found
pub fn parse_entity_id(raw: &str, entity: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(format!("{} not found", entity)))
}

/// Treat blank optional text as absent
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
