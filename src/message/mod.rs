//! The `message` module defines what callers build and hand to a client:
//! device tokens, the `aps` payload with its custom fields, and one message
//! type per gateway protocol.
//!
//! Validation happens here, at construction time. A message that exists has a
//! 32-byte token and, for HTTP, a topic.

pub mod http;
pub mod legacy;
pub mod payload;
pub mod token;

pub use http::{HttpMessage, Priority};
pub use legacy::LegacyMessage;
pub use payload::{Alert, AlertContent, Payload, PayloadMap};
pub use token::DeviceToken;

#[cfg(test)]
mod tests;
