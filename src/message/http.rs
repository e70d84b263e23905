use serde_json::Value;
use uuid::Uuid;

use super::payload::{Payload, PayloadMap};
use super::token::DeviceToken;
use crate::utils::ApnsError;

/// Seconds added to "now" for the default `apns-expiration`.
pub const DEFAULT_EXPIRATION_SECS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Priority {
    /// Deliver at a time that conserves power on the device.
    Low = 5,
    /// Deliver immediately.
    High = 10,
}

impl Priority {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// A notification for the HTTP/2 gateway.
#[derive(Debug, Clone)]
pub struct HttpMessage {
    pub apns_id: String,
    pub topic: String,
    pub priority: Priority,
    pub expiration: i64,
    device_id: String,
    device_token: DeviceToken,
    payload: PayloadMap,
}

impl HttpMessage {
    /// `device_id` is opaque to this crate and is echoed back on the response.
    pub fn new(
        device_id: impl Into<String>,
        device_token: &str,
        topic: impl Into<String>,
        payload: Payload,
    ) -> Result<Self, ApnsError> {
        let device_token = DeviceToken::from_base64(device_token)?;
        let topic = topic.into();
        if topic.is_empty() {
            return Err(ApnsError::MissingTopic);
        }

        let mut message = Self {
            apns_id: Uuid::new_v4().to_string(),
            topic,
            priority: Priority::High,
            expiration: chrono::Utc::now().timestamp() + DEFAULT_EXPIRATION_SECS,
            device_id: device_id.into(),
            device_token,
            payload: PayloadMap::new(),
        };
        message.payload.set_aps(payload);
        Ok(message)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_expiration(mut self, expiration: i64) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_token(&self) -> &DeviceToken {
        &self.device_token
    }

    pub fn payload(&self) -> &PayloadMap {
        &self.payload
    }

    pub fn set_payload(&mut self, payload: Payload) {
        self.payload.set_aps(payload);
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) {
        self.payload.set_field(key, value);
    }
}
