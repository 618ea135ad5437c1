pub mod auth;
pub mod error;
pub mod response;

pub use auth::{AuthData, ChangePasswordRequest, LoginRequest, TokenPair, User};
pub use error::ApiError;
pub use response::ApiResponse;
