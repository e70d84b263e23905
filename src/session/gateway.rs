//! A TLS session with the legacy binary gateway.
//!
//! The gateway never acknowledges a notification. It stays silent on success
//! and, on the first bad notification, writes a 6-byte error frame and closes
//! the connection. The only way to learn the outcome of a batch is therefore
//! to race a read against a timer after writing it: if the timer wins, the
//! batch is assumed delivered. There is no way to tell which message in a
//! batch failed, only that one did.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::rustls::pki_types::ServerName;
use tracing::{debug, info, warn};

use crate::codec::binary::{ERROR_RESPONSE_LEN, ErrorResponse};
use crate::response::{LegacyResponse, codes};
use crate::utils::ApnsError;

/// How long to wait for an error frame before declaring a batch delivered.
pub const DEFAULT_RESPONSE_GRACE: Duration = Duration::from_secs(5);

/// Bytes requested from the socket when waiting for the error frame.
pub const RESPONSE_READ_LEN: usize = 38;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// How long to wait for the rest of an error frame that arrived split.
const FRAME_COMPLETION_WINDOW: Duration = Duration::from_millis(500);

/// Anything a session can run over: a TLS stream in production, an in-memory
/// pipe in tests.
pub trait GatewayStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> GatewayStream for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Dialing,
    Handshaking,
    Open,
}

/// What the read/timer race observed after a batch was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correlation {
    /// The timer fired first.
    Accepted,
    /// The gateway wrote an error frame.
    Rejected(ErrorResponse),
    /// The connection ended, or failed, without a usable frame.
    Closed,
}

impl Correlation {
    pub fn into_response(self) -> LegacyResponse {
        match self {
            Correlation::Accepted => LegacyResponse::delivered(),
            Correlation::Rejected(error) => LegacyResponse::from_status(error.status),
            Correlation::Closed => LegacyResponse::failed(codes::PROCESSING_ERROR),
        }
    }
}

/// Races a single read of up to `RESPONSE_READ_LEN` bytes against `grace`.
///
/// The losing branch is dropped. A read that loses is cancelled before it
/// consumes anything, so the caller should close the session afterwards
/// rather than read from it again.
pub async fn race_read<R>(reader: &mut R, grace: Duration) -> Correlation
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = [0u8; RESPONSE_READ_LEN];

    let read = tokio::select! {
        read = reader.read(&mut buf) => read,
        _ = tokio::time::sleep(grace) => return Correlation::Accepted,
    };

    let n = match read {
        Ok(n) if n > 0 && n < ERROR_RESPONSE_LEN => complete_frame(reader, &mut buf, n).await,
        Ok(n) => n,
        Err(e) => {
            warn!("Reading gateway response failed: {e}");
            return Correlation::Closed;
        }
    };

    match ErrorResponse::parse(&buf[..n]) {
        Some(error) => {
            warn!(
                "Gateway rejected batch: status {} ({}), identifier {:?}",
                error.status,
                codes::legacy_description(error.status),
                error.identifier
            );
            Correlation::Rejected(error)
        }
        None => {
            warn!("Gateway closed the connection after {n} bytes");
            Correlation::Closed
        }
    }
}

/// Reads the rest of a partial error frame, giving up after
/// `FRAME_COMPLETION_WINDOW`. Returns the number of bytes now in `buf`.
async fn complete_frame<R>(reader: &mut R, buf: &mut [u8], mut n: usize) -> usize
where
    R: AsyncRead + Unpin + ?Sized,
{
    let deadline = tokio::time::Instant::now() + FRAME_COMPLETION_WINDOW;
    while n < ERROR_RESPONSE_LEN {
        match tokio::time::timeout_at(deadline, reader.read(&mut buf[n..ERROR_RESPONSE_LEN])).await
        {
            Ok(Ok(read)) if read > 0 => n += read,
            _ => break,
        }
    }
    debug!("Error frame completed to {n} bytes");
    n
}

/// The host portion of a `host:port` gateway address.
pub fn server_name(gateway: &str) -> &str {
    gateway.split(':').next().unwrap_or(gateway)
}

pub struct GatewaySession {
    gateway: String,
    state: SessionState,
    stream: Option<Box<dyn GatewayStream>>,
}

impl GatewaySession {
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
            state: SessionState::Closed,
            stream: None,
        }
    }

    /// A session that is already open over `stream`.
    pub fn from_stream(gateway: impl Into<String>, stream: impl GatewayStream + 'static) -> Self {
        Self {
            gateway: gateway.into(),
            state: SessionState::Open,
            stream: Some(Box::new(stream)),
        }
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Connects and completes the TLS handshake. On failure the session is
    /// left `Closed`.
    pub async fn dial(&mut self, config: Arc<ClientConfig>) -> Result<(), ApnsError> {
        self.close().await;

        let result = self.open(config).await;
        match result {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = SessionState::Open;
                info!("Connected to {}", self.gateway);
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Closed;
                Err(e)
            }
        }
    }

    async fn open(&mut self, config: Arc<ClientConfig>) -> Result<Box<dyn GatewayStream>, ApnsError> {
        self.state = SessionState::Dialing;
        let tcp = TcpStream::connect(&self.gateway)
            .await
            .map_err(|source| ApnsError::Dial {
                addr: self.gateway.clone(),
                source,
            })?;

        self.state = SessionState::Handshaking;
        let domain = ServerName::try_from(server_name(&self.gateway).to_string())
            .map_err(|e| ApnsError::Handshake(e.to_string()))?;
        let tls = TlsConnector::from(config)
            .connect(domain, tcp)
            .await
            .map_err(|e| ApnsError::Handshake(e.to_string()))?;

        Ok(Box::new(tls))
    }

    fn open_stream(&mut self) -> Result<&mut Box<dyn GatewayStream>, ApnsError> {
        match (self.state, self.stream.as_mut()) {
            (SessionState::Open, Some(stream)) => Ok(stream),
            _ => Err(ApnsError::NotOpen),
        }
    }

    /// Writes every frame, in order. The first failed write aborts the rest.
    pub async fn send(&mut self, frames: &[Vec<u8>]) -> Result<(), ApnsError> {
        let stream = self.open_stream()?;
        for frame in frames {
            stream.write_all(frame).await.map_err(ApnsError::Send)?;
            debug!("Wrote {} byte frame", frame.len());
        }
        stream.flush().await.map_err(ApnsError::Send)
    }

    /// Waits up to `grace` for the gateway to reject what was sent.
    pub async fn await_response(&mut self, grace: Duration) -> Result<Correlation, ApnsError> {
        let stream = self.open_stream()?;
        Ok(race_read(stream.as_mut(), grace).await)
    }

    /// The raw stream, for protocols that only read (feedback).
    pub fn stream_mut(&mut self) -> Result<&mut (dyn GatewayStream + 'static), ApnsError> {
        Ok(self.open_stream()?.as_mut())
    }

    /// Releases the connection. Safe to call at any time, any number of times.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            match tokio::time::timeout(CLOSE_TIMEOUT, stream.shutdown()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!("Shutdown of {} failed: {e}", self.gateway),
                Err(_) => debug!("Shutdown of {} timed out", self.gateway),
            }
            info!("Disconnected from {}", self.gateway);
        }
        self.state = SessionState::Closed;
    }
}

impl std::fmt::Debug for GatewaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySession")
            .field("gateway", &self.gateway)
            .field("state", &self.state)
            .finish()
    }
}
