//! # Pushwire
//!
//! `pushwire` delivers Apple push notifications. It speaks both gateway
//! protocols: the legacy binary protocol over a raw TLS socket, and the JSON
//! protocol over HTTP/2. It also reads the legacy feedback service, which lists
//! devices that stopped accepting notifications.
//!
//! ## Core Modules
//!
//! - `message`: Device tokens, the `aps` payload and one message type per protocol.
//! - `codec`: Binary frames, feedback records and HTTP/2 requests. Pure, no I/O.
//! - `session`: A TLS connection to the legacy gateway and the read-versus-timer race
//!   that decides whether a batch was accepted.
//! - `response`: What callers get back, and the code description tables.
//! - `client`: `PushClient`, `HttpPushClient` and `FeedbackClient`.
//! - `credentials`: Loads the client certificate and key.
//! - `config`: Settings from `config/default` and `PUSHWIRE__*` variables.
//! - `utils`: The shared error type and logging setup.

pub mod client;
pub mod codec;
pub mod config;
pub mod credentials;
pub mod message;
pub mod response;
pub mod session;
pub mod utils;
