pub mod doctor;

pub use doctor::DoctorApi;
