use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::ApiError;

/// The envelope every caller-facing API returns.
///
/// Serializes as `{"success": true, "data": ..., "message"?: ...}` or
/// `{"success": false, "error": ..., "status"?: ..., "details"?: ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success {
        data: Option<Value>,
        message: Option<String>,
    },
    Failure {
        error: String,
        status: Option<u16>,
        details: Option<Value>,
    },
}

impl ApiResponse {
    pub fn success(data: Option<Value>) -> Self {
        ApiResponse::Success { data, message: None }
    }

    pub fn success_with_message(data: Option<Value>, message: impl Into<String>) -> Self {
        ApiResponse::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: &ApiError) -> Self {
        ApiResponse::Failure {
            error: error.to_string(),
            status: error.status(),
            details: error.payload().cloned(),
        }
    }

    pub fn from_result(result: Result<Option<Value>, ApiError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiResponse::Success { data, .. } => data.as_ref(),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { message, .. } => message.as_deref(),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Failure { error, .. } => Some(error),
            ApiResponse::Success { .. } => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiResponse::Failure { status, .. } => *status,
            ApiResponse::Success { .. } => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiResponse::Failure { details, .. } => details.as_ref(),
            ApiResponse::Success { .. } => None,
        }
    }
}

impl Serialize for ApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            ApiResponse::Success { data, message } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                if let Some(message) = message {
                    map.serialize_entry("message", message)?;
                }
            }
            ApiResponse::Failure { error, status, details } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(status) = status {
                    map.serialize_entry("status", status)?;
                }
                if let Some(details) = details {
                    map.serialize_entry("details", details)?;
                }
            }
        }
        map.end()
    }
}
