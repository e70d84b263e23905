//! The `client` module ties messages, codecs and sessions together into the
//! calls applications make: send a legacy batch, send HTTP/2 messages, read
//! feedback.

pub mod feedback_client;
pub mod http_client;
pub mod push_client;

pub use feedback_client::FeedbackClient;
pub use http_client::{HttpPushClient, HttpReply, HttpTransport};
pub use push_client::PushClient;
