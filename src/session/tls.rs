use std::sync::Arc;

use async_trait::async_trait;
use tokio_rustls::rustls::ClientConfig;

use super::gateway::GatewaySession;
use crate::credentials::Credentials;
use crate::utils::ApnsError;

/// Opens sessions. Clients take one of these instead of dialing directly so
/// tests can hand them in-memory sessions.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn dial(&self, gateway: &str) -> Result<GatewaySession, ApnsError>;
}

/// Dials real gateways over TCP and TLS.
#[derive(Clone)]
pub struct TlsDialer {
    config: Arc<ClientConfig>,
}

impl TlsDialer {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ApnsError> {
        Ok(Self::new(credentials.client_config()?))
    }
}

#[async_trait]
impl Dialer for TlsDialer {
    async fn dial(&self, gateway: &str) -> Result<GatewaySession, ApnsError> {
        let mut session = GatewaySession::new(gateway);
        session.dial(self.config.clone()).await?;
        Ok(session)
    }
}
