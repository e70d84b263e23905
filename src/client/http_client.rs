use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Request;
use tracing::{debug, error, warn};

use crate::codec::http::{self, APNS_ID};
use crate::credentials::Credentials;
use crate::message::HttpMessage;
use crate::response::{ErrorBody, HttpResponse};
use crate::utils::ApnsError;

/// What came back for one request.
#[derive(Debug, Clone, Default)]
pub struct HttpReply {
    pub status: u16,
    pub apns_id: Option<String>,
    pub body: Vec<u8>,
}

/// Carries encoded requests to the gateway. Implementations must be safe to
/// share between concurrent requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn round_trip(&self, request: Request) -> Result<HttpReply, ApnsError>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn round_trip(&self, request: Request) -> Result<HttpReply, ApnsError> {
        let response = self
            .execute(request)
            .await
            .map_err(|e| ApnsError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let apns_id = response
            .headers()
            .get(APNS_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApnsError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpReply {
            status,
            apns_id,
            body,
        })
    }
}

/// Delivers messages to the HTTP/2 gateway, one request per message.
pub struct HttpPushClient {
    gateway_host: String,
    transport: Arc<dyn HttpTransport>,
}

impl HttpPushClient {
    /// A client that authenticates with `credentials` over HTTP/2.
    pub fn new(gateway_host: impl Into<String>, credentials: &Credentials) -> Result<Self, ApnsError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(credentials.identity()?)
            .http2_prior_knowledge()
            .build()
            .map_err(|e| ApnsError::Transport(e.to_string()))?;

        Ok(Self::with_transport(gateway_host, Arc::new(client)))
    }

    pub fn with_transport(gateway_host: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            gateway_host: gateway_host.into(),
            transport,
        }
    }

    pub fn gateway_host(&self) -> &str {
        &self.gateway_host
    }

    /// Sends each message in turn and returns one response per message, in
    /// the same order. Failures are per message and never stop the batch.
    pub async fn send(&self, messages: &[HttpMessage]) -> Vec<HttpResponse> {
        let mut responses = Vec::with_capacity(messages.len());
        for message in messages {
            responses.push(self.send_one(message).await);
        }
        responses
    }

    pub async fn send_one(&self, message: &HttpMessage) -> HttpResponse {
        let request = match http::encode(message, &self.gateway_host) {
            Ok(request) => request,
            Err(e) => {
                warn!("Message {} not sent: {e}", message.apns_id);
                return HttpResponse::rejected_locally(message, &e);
            }
        };

        let reply = match self.transport.round_trip(request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Request for {} failed: {e}", message.apns_id);
                return HttpResponse::unavailable(message);
            }
        };

        let mut response = HttpResponse::new(message, reply.status);
        if let Some(apns_id) = reply.apns_id {
            response.apns_id = apns_id;
        }

        if response.is_success() {
            debug!("Message {} accepted", response.apns_id);
            return response;
        }

        let body = if reply.body.is_empty() {
            ErrorBody::default()
        } else {
            serde_json::from_slice(&reply.body).unwrap_or_else(|e| {
                warn!("Unreadable error body for {}: {e}", response.apns_id);
                ErrorBody::default()
            })
        };
        let response = response.with_error_body(body);
        warn!(
            "Message {} rejected with {}: {}",
            response.apns_id,
            response.status,
            response.reason.as_deref().unwrap_or("no reason")
        );
        response
    }
}
