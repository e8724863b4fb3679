//! Validation Utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use validator::ValidationErrors;

use super::error::AppError;

/// Dutch postal code: four digits, optional whitespace, two letters.
pub static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{4}\s?[A-Z]{2}$").expect("postal code pattern is valid"));

/// Convert validation errors to AppError.
///
/// Each failing field yields one message of the form
/// `<field> value '<rejected value>' <message>`, with the field named as it
/// appears on the wire (camelCase).
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(field);
            errs.iter().map(move |e| {
                let rejected = match e.params.get("value") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => "null".to_string(),
                    Some(other) => other.to_string(),
                };
                let message = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{} value '{}' {}", field, rejected, message)
            })
        })
        .collect();

    if messages.is_empty() {
        messages.push("Validation failed".into());
    }
    messages.sort();

    AppError::Validation(messages)
}

/// `house_number_additions` -> `houseNumberAdditions`
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
