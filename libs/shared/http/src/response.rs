use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::warn;

/// Reads a JSON payload from a response, degrading to `None` instead of failing.
///
/// 204 responses and non-JSON content types are not read at all. Malformed
/// JSON or a broken body stream is logged and treated as "no data".
pub async fn parse_response_body(response: Response) -> Option<Value> {
    if response.status() == StatusCode::NO_CONTENT || !is_json(&response) {
        return None;
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read response body: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse response JSON: {}", e);
            None
        }
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false)
}
