pub mod services;

pub use services::PatientApi;
