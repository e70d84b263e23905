use rand::Rng;
use serde_json::Value;

use super::payload::{Payload, PayloadMap};
use super::token::DeviceToken;
use crate::utils::ApnsError;

/// OS version assumed when the caller gives none; selects the small payload limit.
pub const DEFAULT_OS_VERSION: &str = "7.0";

/// Priority 10: deliver immediately.
pub const PRIORITY_IMMEDIATE: u8 = 10;

/// Upper bound (exclusive) for generated message identifiers.
const MAX_IDENTIFIER: i32 = 9999;

/// A notification for the legacy binary gateway.
#[derive(Debug, Clone)]
pub struct LegacyMessage {
    /// Echoed back by the gateway in an error frame.
    pub identifier: i32,
    /// Seconds since the epoch after which the gateway may drop the message.
    pub expiration: u32,
    /// Only used to pick the payload size limit.
    pub os_version: String,
    device_token: DeviceToken,
    priority: u8,
    payload: PayloadMap,
}

impl LegacyMessage {
    pub fn new(device_token: &str, os_version: &str) -> Result<Self, ApnsError> {
        Self::with_rng(device_token, os_version, &mut rand::thread_rng())
    }

    /// Builds a message whose identifier is drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        device_token: &str,
        os_version: &str,
        rng: &mut R,
    ) -> Result<Self, ApnsError> {
        let device_token = DeviceToken::from_base64(device_token)?;
        let os_version = if os_version.is_empty() {
            DEFAULT_OS_VERSION.to_string()
        } else {
            os_version.to_string()
        };

        Ok(Self {
            identifier: rng.gen_range(0..MAX_IDENTIFIER),
            expiration: 0,
            os_version,
            device_token,
            priority: PRIORITY_IMMEDIATE,
            payload: PayloadMap::new(),
        })
    }

    pub fn device_token(&self) -> &DeviceToken {
        &self.device_token
    }

    pub fn priority(&self) -> u8 {
        self.priority
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
