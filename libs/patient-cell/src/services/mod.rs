pub mod patient;

pub use patient::PatientApi;
