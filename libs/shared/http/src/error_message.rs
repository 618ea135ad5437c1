//! Turns the backend's assorted error payloads into one display string.
//!
//! Standard keys (`error`, `detail`, `message`, `non_field_errors`) always win
//! over the per-field scan used for validation errors like
//! `{"email": ["This field is required"]}`.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorShape<'a> {
    Error(&'a str),
    Detail(&'a str),
    DetailList(&'a [Value]),
    Message(&'a str),
    MessageList(&'a [Value]),
    NonFieldErrors(&'a [Value]),
    NonFieldError(&'a str),
    FieldList { field: &'a str, values: &'a [Value] },
    Field { field: &'a str, value: &'a str },
    Nested { field: &'a str, subfield: &'a str, value: &'a str },
}

impl<'a> ErrorShape<'a> {
    /// Finds the highest-priority shape present in `payload`, if any.
    pub fn classify(payload: &'a Value) -> Option<Self> {
        let object = payload.as_object()?;

        if let Some(Value::String(error)) = object.get("error") {
            if !error.is_empty() {
                return Some(ErrorShape::Error(error));
            }
        }

        match object.get("detail") {
            Some(Value::String(detail)) => return Some(ErrorShape::Detail(detail)),
            Some(Value::Array(items)) => return Some(ErrorShape::DetailList(items)),
            _ => {}
        }

        match object.get("message") {
            Some(Value::String(message)) => return Some(ErrorShape::Message(message)),
            Some(Value::Array(items)) => return Some(ErrorShape::MessageList(items)),
            _ => {}
        }

        match object.get("non_field_errors") {
            Some(Value::Array(items)) => return Some(ErrorShape::NonFieldErrors(items)),
            Some(Value::String(s)) if !s.is_empty() => return Some(ErrorShape::NonFieldError(s)),
            _ => {}
        }

        scan_fields(object)
    }

    pub fn message(&self) -> String {
        match self {
            ErrorShape::Error(s)
            | ErrorShape::Detail(s)
            | ErrorShape::Message(s)
            | ErrorShape::NonFieldError(s) => s.to_string(),
            ErrorShape::DetailList(items)
            | ErrorShape::MessageList(items)
            | ErrorShape::NonFieldErrors(items) => join(items),
            ErrorShape::FieldList { field, values } => format!("{}: {}", field, join(values)),
            ErrorShape::Field { field, value } => format!("{}: {}", field, value),
            ErrorShape::Nested { field, subfield, value } => {
                format!("{} ({}): {}", field, subfield, value)
            }
        }
    }
}

fn scan_fields(object: &Map<String, Value>) -> Option<ErrorShape<'_>> {
    object
        .iter()
        .filter(|(key, _)| key.as_str() != "success" && key.as_str() != "error")
        .find_map(|(key, value)| match value {
            Value::Array(values) => Some(ErrorShape::FieldList { field: key, values }),
            Value::String(value) => Some(ErrorShape::Field { field: key, value }),
            Value::Object(nested) => match nested.iter().next() {
                Some((subfield, Value::String(value))) => Some(ErrorShape::Nested {
                    field: key,
                    subfield,
                    value,
                }),
                _ => None,
            },
            _ => None,
        })
}

// Same rendering as JavaScript's `Array.prototype.join(", ")` for flat values.
fn join(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn extract_error_message(payload: Option<&Value>, fallback: &str) -> String {
    payload
        .and_then(ErrorShape::classify)
        .map(|shape| shape.message())
        .unwrap_or_else(|| fallback.to_string())
}
