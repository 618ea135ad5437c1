pub mod hospital;
pub mod owner;

pub use hospital::HospitalApi;
pub use owner::OwnerApi;
