pub mod services;

pub use services::DoctorApi;
