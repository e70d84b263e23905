//! The `response` module holds what the clients hand back to callers, and the
//! tables that turn gateway codes into readable descriptions.

pub mod codes;
pub mod response;

pub use response::{ErrorBody, HttpResponse, LegacyResponse};
