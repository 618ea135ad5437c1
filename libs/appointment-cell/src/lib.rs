pub mod services;

pub use services::AppointmentApi;
