//! The `error` module defines the error type shared by every layer of `pushwire`.
//!
//! Construction errors surface when a message is built, encoding errors when it
//! is serialized for a transport, and transport errors when a session or HTTP
//! request fails. Send operations fold the latter two into responses; only
//! construction and setup errors reach the caller as `Err`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApnsError {
    #[error("invalid device token: {0}")]
    InvalidDeviceToken(String),

    #[error("device token is missing")]
    MissingDeviceToken,

    #[error("apns-topic is missing")]
    MissingTopic,

    #[error("payload must not be empty")]
    EmptyPayload,

    #[error("payload is {size} bytes, larger than the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Reported to callers as `InternalServerError`; the payload itself may be fine.
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("value for header {0} is not a valid header value")]
    InvalidHeader(&'static str),

    #[error("gateway host is not set")]
    ServiceUnavailable,

    #[error("failed to connect to {addr}: {source}")]
    Dial {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake failed: {0}")]
    Handshake(String),

    #[error("failed to write to gateway: {0}")]
    Send(#[source] std::io::Error),

    #[error("session is not open")]
    NotOpen,

    #[error("HTTP transport failed: {0}")]
    Transport(String),

    #[error("failed to load credentials: {0}")]
    Credentials(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ApnsError {
    /// The APNs reason string that best describes this error, used when a
    /// local failure has to be reported in the shape of a gateway response.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ApnsError::InvalidDeviceToken(_) => "BadDeviceToken",
            ApnsError::MissingDeviceToken => "MissingDeviceToken",
            ApnsError::MissingTopic => "MissingTopic",
            ApnsError::EmptyPayload => "PayloadEmpty",
            ApnsError::PayloadTooLarge { .. } => "PayloadTooLarge",
            ApnsError::Serialization(_) => "InternalServerError",
            ApnsError::InvalidHeader("apns-id") => "BadMessageId",
            ApnsError::InvalidHeader("apns-topic") => "BadTopic",
            ApnsError::InvalidHeader(_) => "BadPath",
            ApnsError::ServiceUnavailable
            | ApnsError::Dial { .. }
            | ApnsError::Handshake(_)
            | ApnsError::Send(_)
            | ApnsError::NotOpen
            | ApnsError::Transport(_) => "ServiceUnavailable",
            ApnsError::Credentials(_) => "BadCertificate",
            ApnsError::Config(_) => "InternalServerError",
        }
    }
}
