use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::utils::ApnsError;

pub const DEVICE_TOKEN_LEN: usize = 32;

/// A raw 32-byte APNs device token.
///
/// Tokens travel between the caller and this crate as standard base64 and go
/// on the wire either raw (binary protocol) or as lowercase hex (HTTP path).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceToken([u8; DEVICE_TOKEN_LEN]);

impl DeviceToken {
    pub fn from_base64(encoded: &str) -> Result<Self, ApnsError> {
        if encoded.is_empty() {
            return Err(ApnsError::MissingDeviceToken);
        }
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ApnsError::InvalidDeviceToken(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ApnsError> {
        let raw: [u8; DEVICE_TOKEN_LEN] = bytes.try_into().map_err(|_| {
            ApnsError::InvalidDeviceToken(format!(
                "expected {DEVICE_TOKEN_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    pub fn from_raw(raw: [u8; DEVICE_TOKEN_LEN]) -> Self {
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; DEVICE_TOKEN_LEN] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeviceToken").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}
