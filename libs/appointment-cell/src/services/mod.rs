pub mod booking;

pub use booking::AppointmentApi;
