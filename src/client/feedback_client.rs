use std::sync::Arc;

use futures_util::StreamExt;
use tracing::info;

use crate::codec::{FeedbackRecord, feedback_stream};
use crate::session::Dialer;
use crate::utils::ApnsError;

/// Reads the list of devices that no longer accept notifications.
pub struct FeedbackClient {
    gateway: String,
    dialer: Arc<dyn Dialer>,
}

impl FeedbackClient {
    pub fn new(gateway: impl Into<String>, dialer: Arc<dyn Dialer>) -> Self {
        Self {
            gateway: gateway.into(),
            dialer,
        }
    }

    /// Drains the feedback service. The gateway closes the connection once it
    /// has written every record, so this returns at end of data.
    pub async fn fetch(&self) -> Result<Vec<FeedbackRecord>, ApnsError> {
        let mut session = self.dialer.dial(&self.gateway).await?;
        let records: Vec<FeedbackRecord> = feedback_stream(session.stream_mut()?).collect().await;
        session.close().await;

        info!("Read {} feedback records from {}", records.len(), self.gateway);
        Ok(records)
    }
}
