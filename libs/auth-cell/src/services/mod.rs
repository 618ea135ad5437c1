pub mod auth;

pub use auth::AuthApi;
