use serde_json::Value;
use tracing::warn;

/// Builds a form-encoded query string from a JSON object.
///
/// `null` and empty-string values are dropped; arrays contribute one pair
/// per usable element. Returns `""` when nothing is left, `"?..."` otherwise.
pub fn build_query_string(params: &Value) -> String {
    let Some(object) = params.as_object() else {
        return String::new();
    };

    let mut pairs: Vec<(&str, String)> = Vec::new();
    for (key, value) in object {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().filter_map(query_value).map(|v| (key.as_str(), v)));
            }
            other => {
                if let Some(v) = query_value(other) {
                    pairs.push((key.as_str(), v));
                }
            }
        }
    }

    if pairs.is_empty() {
        return String::new();
    }

    match serde_urlencoded::to_string(&pairs) {
        Ok(query) => format!("?{}", query),
        Err(e) => {
            warn!("Failed to encode query parameters: {}", e);
            String::new()
        }
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_and_missing_values_are_dropped() {
        assert_eq!(build_query_string(&json!({})), "");
        assert_eq!(build_query_string(&json!({"a": null, "b": ""})), "");
        assert_eq!(build_query_string(&json!(null)), "");
    }

    #[test]
    fn test_arrays_expand_to_repeated_keys() {
        let query = build_query_string(&json!({
            "status": ["scheduled", "", null, "completed"],
            "page": 2
        }));
        assert_eq!(query, "?status=scheduled&status=completed&page=2");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let query = build_query_string(&json!({
            "department": "Heart & Lungs",
            "date": "2025-01-02",
            "urgent": true
        }));
        assert_eq!(query, "?department=Heart+%26+Lungs&date=2025-01-02&urgent=true");
    }
}
