//! Mapping of `validator` failures to field errors.

use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::FieldError;

/// Flatten a (possibly nested) validation result into field errors rooted
/// at `prefix`.
pub fn field_errors(prefix: &[String], errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(prefix.to_vec(), errors, &mut out);
    out
}

fn collect(prefix: Vec<String>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let mut loc = prefix.clone();
        loc.push(field.to_string());

        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let (kind, msg) = describe(failure);
                    out.push(FieldError::new(
                        loc.clone(),
                        kind,
                        msg,
                        failure.params.get("value").cloned(),
                    ));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(loc, nested, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    let mut entry_loc = loc.clone();
                    entry_loc.push(index.to_string());
                    collect(entry_loc, nested, out);
                }
            }
        }
    }
}

/// Error kind and message for a single failure.
fn describe(err: &ValidationError) -> (String, String) {
    match err.code.as_ref() {
        "range" => describe_range(err),
        "length" => describe_length(err),
        "value_error" => (
            "value_error".to_string(),
            format!("Value error, {}", message_or_code(err)),
        ),
        code => (code.to_string(), message_or_code(err)),
    }
}

fn message_or_code(err: &ValidationError) -> String {
    err.message
        .as_deref()
        .unwrap_or(err.code.as_ref())
        .to_string()
}

fn number(err: &ValidationError, key: &str) -> Option<f64> {
    err.params.get(key).and_then(Value::as_f64)
}

fn bound(err: &ValidationError, key: &str) -> String {
    err.params
        .get(key)
        .map(Value::to_string)
        .unwrap_or_default()
}

fn describe_range(err: &ValidationError) -> (String, String) {
    let value = number(err, "value");
    let violates = |key: &str, broken: fn(f64, f64) -> bool| match (number(err, key), value) {
        (Some(limit), Some(value)) => broken(value, limit),
        (Some(_), None) => true,
        _ => false,
    };

    let (kind, relation, key) = if violates("exclusive_min", |v, l| v <= l) {
        ("greater_than", "greater than", "exclusive_min")
    } else if violates("min", |v, l| v < l) {
        ("greater_than_equal", "greater than or equal to", "min")
    } else if violates("exclusive_max", |v, l| v >= l) {
        ("less_than", "less than", "exclusive_max")
    } else if violates("max", |v, l| v > l) {
        ("less_than_equal", "less than or equal to", "max")
    } else {
        return ("range".to_string(), message_or_code(err));
    };

    (
        kind.to_string(),
        format!("Input should be {} {}", relation, bound(err, key)),
    )
}

fn describe_length(err: &ValidationError) -> (String, String) {
    let length = err
        .params
        .get("value")
        .and_then(Value::as_str)
        .map(|s| s.chars().count() as f64);

    let too_long = match (number(err, "max"), length) {
        (Some(max), Some(length)) => length > max,
        (Some(_), None) => number(err, "min").is_none(),
        _ => false,
    };

    if too_long {
        (
            "string_too_long".to_string(),
            format!("String should have at most {} characters", bound(err, "max")),
        )
    } else if number(err, "min").is_some() {
        (
            "string_too_short".to_string(),
            format!("String should have at least {} characters", bound(err, "min")),
        )
    } else {
        ("length".to_string(), message_or_code(err))
    }
}
