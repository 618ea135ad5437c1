pub mod services;

pub use services::AuthApi;
