use serde::{Deserialize, Serialize};

use super::codes;
use crate::message::HttpMessage;
use crate::utils::ApnsError;

/// Outcome of one legacy batch.
///
/// The binary protocol acknowledges nothing on success and names at most one
/// failed identifier on error, so the result covers the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyResponse {
    pub success: bool,
    pub description: String,
}

impl LegacyResponse {
    pub fn delivered() -> Self {
        Self {
            success: true,
            description: codes::NO_ERRORS.to_string(),
        }
    }

    pub fn failed(description: &str) -> Self {
        Self {
            success: false,
            description: description.to_string(),
        }
    }

    /// A failure described by a legacy status byte.
    pub fn from_status(status: u8) -> Self {
        Self::failed(codes::legacy_description(status))
    }
}

/// Outcome of one HTTP/2 request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    pub apns_id: String,
    pub device_id: String,
    /// Base64, as the caller supplied it.
    pub device_token: String,
    pub status: u16,
    pub status_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub reason_description: String,
    /// When the gateway last knew the token to be valid (milliseconds since the epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// JSON body of a non-200 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl HttpResponse {
    pub fn new(message: &HttpMessage, status: u16) -> Self {
        Self {
            apns_id: message.apns_id.clone(),
            device_id: message.device_id().to_string(),
            device_token: message.device_token().to_base64(),
            status,
            status_description: codes::status_description(status).to_string(),
            reason: None,
            reason_description: String::new(),
            timestamp: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason_description = codes::reason_description(reason).to_string();
        self.reason = Some(reason.to_string());
        self
    }

    pub fn with_error_body(mut self, body: ErrorBody) -> Self {
        if let Some(reason) = body.reason.as_deref() {
            self = self.with_reason(reason);
        }
        self.timestamp = body.timestamp;
        self
    }

    /// Response for a message that never left the process.
    pub fn rejected_locally(message: &HttpMessage, error: &ApnsError) -> Self {
        Self::new(message, 400).with_reason(error.reason_code())
    }

    /// Response for a request the transport could not complete.
    pub fn unavailable(message: &HttpMessage) -> Self {
        Self::new(message, 503).with_reason("ServiceUnavailable")
    }
}
