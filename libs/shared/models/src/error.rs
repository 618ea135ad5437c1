use serde_json::Value;
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please log in again.";
pub const MISSING_REFRESH_TOKEN_MESSAGE: &str = "Missing refresh token.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("Unauthorized. Please log in again.")]
    Unauthorized,

    #[error("Missing refresh token.")]
    MissingRefreshToken,

    #[error("{0}")]
    RefreshFailed(String),

    /// Non-2xx response. `message` is already extracted from `payload`.
    #[error("{message}")]
    Http {
        message: String,
        status: u16,
        payload: Option<Value>,
    },

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Http { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}
