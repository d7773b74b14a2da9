//! Request-body validation helpers built on the `validator` crate.
//!
//! Validation failures are reported as one human-readable message per invalid
//! field, e.g. `"field title is a required field"`.

use validator::{Validate, ValidationError, ValidationErrors};

/// Error code used for fields that are missing or blank after trimming.
pub const CODE_REQUIRED: &str = "required";

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(CODE_REQUIRED));
    }
    Ok(())
}

/// Validate `input`, returning one message per invalid field on failure.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), Vec<String>> {
    input.validate().map_err(|errors| field_messages(&errors))
}

/// Flatten [`ValidationErrors`] into per-field messages, sorted by field name.
///
/// One error is reported per field. A missing or blank field is always
/// reported as required, whatever other checks it also failed.
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .find(|err| err.code == CODE_REQUIRED)
                .or_else(|| errs.first())
                .map(|err| {
                    let message = describe(&field, err);
                    (field, message)
                })
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields.into_iter().map(|(_, message)| message).collect()
}

fn describe(field: &str, err: &ValidationError) -> String {
    match err.code.as_ref() {
        CODE_REQUIRED => format!("field {field} is a required field"),
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (Some(min), Some(max)) => {
                format!("field {field} must be between {min} and {max} characters")
            }
            _ => format!("field {field} has an invalid length"),
        },
        _ => format!("field {field} is not valid"),
    }
}
