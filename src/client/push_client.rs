use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::codec::binary;
use crate::message::LegacyMessage;
use crate::response::{LegacyResponse, codes};
use crate::session::{DEFAULT_RESPONSE_GRACE, Dialer, GatewaySession};
use crate::utils::ApnsError;

/// Delivers batches to the legacy binary gateway.
///
/// Every call opens its own session and closes it before returning; nothing
/// is kept between calls.
pub struct PushClient {
    gateway: String,
    dialer: Arc<dyn Dialer>,
    response_grace: Duration,
}

impl PushClient {
    pub fn new(gateway: impl Into<String>, dialer: Arc<dyn Dialer>) -> Self {
        Self {
            gateway: gateway.into(),
            dialer,
            response_grace: DEFAULT_RESPONSE_GRACE,
        }
    }

    pub fn with_response_grace(mut self, grace: Duration) -> Self {
        self.response_grace = grace;
        self
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    /// Sends `messages` as one batch and reports one outcome for all of them.
    ///
    /// A rejection from the gateway fails the whole batch; which message
    /// caused it is not reported.
    pub async fn send(&self, messages: &[LegacyMessage]) -> LegacyResponse {
        if messages.is_empty() {
            warn!("Refusing to send an empty batch");
            return LegacyResponse::failed(codes::SHUTDOWN);
        }

        let frames = match messages.iter().map(binary::encode).collect::<Result<Vec<_>, _>>() {
            Ok(frames) => frames,
            Err(e) => {
                warn!("Batch not sent, encoding failed: {e}");
                return LegacyResponse::failed(encoding_failure(&e));
            }
        };

        let mut session = match self.dialer.dial(&self.gateway).await {
            Ok(session) => session,
            Err(e) => {
                error!("Cannot reach {}: {e}", self.gateway);
                return LegacyResponse::failed(codes::SHUTDOWN);
            }
        };

        let response = self.deliver(&mut session, &frames).await;
        session.close().await;

        info!(
            "Batch of {} to {}: {}",
            messages.len(),
            self.gateway,
            response.description
        );
        response
    }

    async fn deliver(&self, session: &mut GatewaySession, frames: &[Vec<u8>]) -> LegacyResponse {
        if let Err(e) = session.send(frames).await {
            error!("Batch write failed: {e}");
            return LegacyResponse::failed(codes::PROCESSING_ERROR);
        }

        match session.await_response(self.response_grace).await {
            Ok(correlation) => correlation.into_response(),
            Err(e) => {
                error!("Waiting for gateway response failed: {e}");
                LegacyResponse::failed(codes::PROCESSING_ERROR)
            }
        }
    }
}

/// The legacy status that matches a local encoding failure.
fn encoding_failure(error: &ApnsError) -> &'static str {
    match error {
        ApnsError::EmptyPayload => codes::MISSING_PAYLOAD,
        ApnsError::PayloadTooLarge { .. } => codes::INVALID_PAYLOAD_SIZE,
        _ => codes::PROCESSING_ERROR,
    }
}
