//! The `codec` module turns messages into wire bytes and wire bytes into
//! records. Nothing here touches a socket; every function is a pure
//! transformation of its input.

pub mod binary;
pub mod feedback;
pub mod http;

pub use feedback::{FeedbackDecoder, FeedbackRecord, feedback_stream};
