pub mod services;

pub use services::{HospitalApi, OwnerApi};
