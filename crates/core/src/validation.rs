//! Request-payload normalisation and validation.
//!
//! DTOs derive [`validator::Validate`] for their field rules and implement
//! [`Normalize`] to trim string input. [`prepare`] runs both and converts the
//! first failure into a [`CoreError::Validation`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// In-place cleanup applied to a payload before it is validated.
pub trait Normalize {
    fn normalize(&mut self);
}

/// Trim a required string field in place.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional string field in place.
pub fn trim_opt_in_place(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        trim_in_place(v);
    }
}

/// Normalize then validate a payload, returning it ready for persistence.
pub fn prepare<T: Normalize + Validate>(mut input: T) -> Result<T, CoreError> {
    input.normalize();
    validate_input(&input)?;
    Ok(input)
}

/// Validate a payload, mapping the first field error to [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|errors| CoreError::Validation(first_message(&errors)))
}

/// Deterministic (field-name ordered) message for the first failing rule.
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    let Some(field) = fields.first() else {
        return "Invalid request body".to_string();
    };

    match field_errors[*field].first() {
        Some(err) => match &err.message {
            Some(message) => format!("\"{field}\" {message}"),
            None => format!("\"{field}\" failed {} validation", err.code),
        },
        None => format!("\"{field}\" is invalid"),
    }
}
