//! Decoder for the feedback service.
//!
//! The feedback gateway writes a run of fixed 38-byte records and then closes
//! the connection:
//!
//! ```text
//! timestamp(4) | token_length(2) | device_token(32)
//! ```
//!
//! A trailing partial record is dropped.

use chrono::{DateTime, Utc};
use futures_util::Stream;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::message::DeviceToken;
use crate::message::token::DEVICE_TOKEN_LEN;

pub const FEEDBACK_RECORD_LEN: usize = 38;

/// A device the gateway saw as uninstalled since `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    /// The length field as sent; not enforced.
    pub token_length: u16,
    pub device_token: DeviceToken,
}

pub fn decode_record(chunk: &[u8; FEEDBACK_RECORD_LEN]) -> FeedbackRecord {
    let [t0, t1, t2, t3, l0, l1, token @ ..] = *chunk;
    let secs = u32::from_be_bytes([t0, t1, t2, t3]);
    let token_length = u16::from_be_bytes([l0, l1]);

    if usize::from(token_length) != DEVICE_TOKEN_LEN {
        warn!("Feedback record declares token length {token_length}, reading {DEVICE_TOKEN_LEN} bytes");
    }

    FeedbackRecord {
        timestamp: DateTime::from_timestamp(i64::from(secs), 0).unwrap_or_default(),
        token_length,
        device_token: DeviceToken::from_raw(token),
    }
}

/// Lazily decodes records from an in-memory buffer.
#[derive(Debug, Clone)]
pub struct FeedbackDecoder<'a> {
    remaining: &'a [u8],
}

impl<'a> FeedbackDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes }
    }
}

impl Iterator for FeedbackDecoder<'_> {
    type Item = FeedbackRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.remaining;
        let Some((chunk, rest)) = remaining.split_first_chunk::<FEEDBACK_RECORD_LEN>() else {
            if !remaining.is_empty() {
                debug!("Dropping {} trailing feedback bytes", remaining.len());
                self.remaining = &[];
            }
            return None;
        };
        self.remaining = rest;
        Some(decode_record(chunk))
    }
}

/// Lazily decodes records from a socket until it reaches end of data.
///
/// A read error ends the stream the same way EOF does.
pub fn feedback_stream<R>(reader: R) -> impl Stream<Item = FeedbackRecord>
where
    R: AsyncRead + Unpin,
{
    futures_util::stream::unfold(reader, |mut reader| async move {
        let mut chunk = [0u8; FEEDBACK_RECORD_LEN];
        match reader.read_exact(&mut chunk).await {
            Ok(_) => Some((decode_record(&chunk), reader)),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => None,
            Err(e) => {
                warn!("Feedback read failed: {e}");
                None
            }
        }
    })
}
