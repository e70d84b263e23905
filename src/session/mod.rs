//! The `session` module owns connections to the legacy gateways: the TLS
//! lifecycle, ordered frame writes, and the read/timer race that stands in
//! for an acknowledgement.

pub mod gateway;
pub mod tls;

pub use gateway::{
    Correlation, DEFAULT_RESPONSE_GRACE, GatewaySession, GatewayStream, SessionState, race_read,
};
pub use tls::{Dialer, TlsDialer};

#[cfg(test)]
mod tests;
