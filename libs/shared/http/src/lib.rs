pub mod client;
pub mod error_message;
pub mod query;
pub mod request;
pub mod response;
pub mod session;

pub use client::HealHubClient;
pub use error_message::{extract_error_message, ErrorShape};
pub use query::build_query_string;
pub use request::{ApiRequest, RequestBody};
pub use response::parse_response_body;
pub use session::{FileSessionStore, InMemorySessionStore, Session, SessionStore};
