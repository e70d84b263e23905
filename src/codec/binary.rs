//! Enhanced notification format (command 2) for the legacy binary gateway.
//!
//! ```text
//! command(1)=2 | frame_length(4) | item*
//! item = item_id(1) | item_length(2) | item_data
//! ```
//!
//! Items are written in id order: device token, payload, identifier,
//! expiration, priority. All integers are big-endian.

use tracing::warn;

use crate::message::LegacyMessage;
use crate::utils::ApnsError;

pub const COMMAND_NOTIFICATION: u8 = 2;
pub const COMMAND_ERROR_RESPONSE: u8 = 8;

/// Payload limit for devices before iOS 8.
pub const LEGACY_MAX_PAYLOAD: usize = 255;
/// Payload limit for iOS 8 and later.
pub const EXTENDED_MAX_PAYLOAD: usize = 2048;

const ITEM_DEVICE_TOKEN: u8 = 1;
const ITEM_PAYLOAD: u8 = 2;
const ITEM_IDENTIFIER: u8 = 3;
const ITEM_EXPIRATION: u8 = 4;
const ITEM_PRIORITY: u8 = 5;

const HEADER_LEN: usize = 5;
/// Bytes of frame content other than the payload JSON itself.
const FRAME_OVERHEAD: usize = 56;

/// Length of the gateway's error frame: `command(1)=8 | status(1) | identifier(4)`.
pub const ERROR_RESPONSE_LEN: usize = 6;

/// Payload limit for the given OS version string.
///
/// Only the major component is considered; anything unparsable gets the
/// smaller limit.
pub fn payload_limit(os_version: &str) -> usize {
    let major = os_version
        .split('.')
        .next()
        .and_then(|major| major.trim().parse::<u32>().ok());

    match major {
        Some(major) if major >= 8 => EXTENDED_MAX_PAYLOAD,
        _ => LEGACY_MAX_PAYLOAD,
    }
}

/// Size of the encoded frame for the message's current payload.
pub fn encoded_len(message: &LegacyMessage) -> usize {
    let payload_len = message
        .payload()
        .to_json()
        .map(|json| json.len())
        .unwrap_or(0);
    HEADER_LEN + FRAME_OVERHEAD + payload_len
}

pub fn encode(message: &LegacyMessage) -> Result<Vec<u8>, ApnsError> {
    if !message.payload().has_aps() {
        return Err(ApnsError::EmptyPayload);
    }

    let payload = message.payload().to_json()?;
    let limit = payload_limit(&message.os_version);
    if payload.len() > limit {
        return Err(ApnsError::PayloadTooLarge {
            size: payload.len(),
            limit,
        });
    }

    // limit <= 2048, so both lengths fit their fields
    let frame_len = (FRAME_OVERHEAD + payload.len()) as u32;

    let mut frame = Vec::with_capacity(HEADER_LEN + FRAME_OVERHEAD + payload.len());
    frame.push(COMMAND_NOTIFICATION);
    frame.extend_from_slice(&frame_len.to_be_bytes());
    put_item(&mut frame, ITEM_DEVICE_TOKEN, message.device_token().as_bytes());
    put_item(&mut frame, ITEM_PAYLOAD, &payload);
    put_item(&mut frame, ITEM_IDENTIFIER, &message.identifier.to_be_bytes());
    put_item(&mut frame, ITEM_EXPIRATION, &message.expiration.to_be_bytes());
    put_item(&mut frame, ITEM_PRIORITY, &[message.priority()]);

    Ok(frame)
}

fn put_item(frame: &mut Vec<u8>, id: u8, data: &[u8]) {
    frame.push(id);
    frame.extend_from_slice(&(data.len() as u16).to_be_bytes());
    frame.extend_from_slice(data);
}

/// The frame the gateway writes before closing the connection on an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorResponse {
    pub command: u8,
    pub status: u8,
    /// Identifier of the rejected message, when the full frame arrived.
    pub identifier: Option<i32>,
}

impl ErrorResponse {
    /// Parses whatever the gateway sent. At least the command and status
    /// bytes must be present.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&command, rest) = bytes.split_first()?;
        let (&status, _) = rest.split_first()?;
        let identifier = bytes
            .get(2..ERROR_RESPONSE_LEN)
            .and_then(|id| <[u8; 4]>::try_from(id).ok())
            .map(i32::from_be_bytes);

        if command != COMMAND_ERROR_RESPONSE {
            warn!("Unexpected command {command} in gateway response");
        }

        Some(Self {
            command,
            status,
            identifier,
        })
    }
}
