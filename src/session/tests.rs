use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::rustls::crypto::ring;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};

use super::gateway::server_name;
use super::*;
use crate::codec::binary::ErrorResponse;
use crate::utils::ApnsError;

fn anonymous_config() -> Arc<ClientConfig> {
    let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_root_certificates(RootCertStore::empty())
        .with_no_client_auth();
    Arc::new(config)
}

#[test]
fn test_server_name_strips_port() {
    assert_eq!(
        server_name("gateway.push.apple.com:2195"),
        "gateway.push.apple.com"
    );
    assert_eq!(server_name("localhost"), "localhost");
}

#[tokio::test(start_paused = true)]
async fn test_race_rejection_wins() {
    let (mut gateway, mut client) = tokio::io::duplex(64);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        gateway.write_all(&[0x08, 0x02, 0, 0, 0, 1]).await.unwrap();
        // hold the pipe open past the grace period
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let outcome = race_read(&mut client, DEFAULT_RESPONSE_GRACE).await;
    assert_eq!(
        outcome,
        Correlation::Rejected(ErrorResponse {
            command: 8,
            status: 2,
            identifier: Some(1),
        })
    );

    let response = outcome.into_response();
    assert!(!response.success);
    assert_eq!(response.description, "MISSING_DEVICE_TOKEN");
}

#[tokio::test(start_paused = true)]
async fn test_race_timer_wins_on_silence() {
    let (_gateway, mut client) = tokio::io::duplex(64);

    let started = tokio::time::Instant::now();
    let outcome = race_read(&mut client, DEFAULT_RESPONSE_GRACE).await;

    assert_eq!(outcome, Correlation::Accepted);
    assert!(started.elapsed() >= DEFAULT_RESPONSE_GRACE);

    let response = outcome.into_response();
    assert!(response.success);
    assert_eq!(response.description, "NO_ERRORS");
}

#[tokio::test(start_paused = true)]
async fn test_race_connection_closed() {
    let (gateway, mut client) = tokio::io::duplex(64);
    drop(gateway);

    let outcome = race_read(&mut client, DEFAULT_RESPONSE_GRACE).await;
    assert_eq!(outcome, Correlation::Closed);
    assert_eq!(outcome.into_response().description, "PROCESSING_ERROR");
}

#[tokio::test(start_paused = true)]
async fn test_race_reassembles_split_error_frame() {
    let (mut gateway, mut client) = tokio::io::duplex(64);

    tokio::spawn(async move {
        gateway.write_all(&[0x08]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        gateway.write_all(&[0x08, 0, 0, 0, 42]).await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let outcome = race_read(&mut client, DEFAULT_RESPONSE_GRACE).await;
    assert_eq!(
        outcome,
        Correlation::Rejected(ErrorResponse {
            command: 8,
            status: 8,
            identifier: Some(42),
        })
    );
    assert_eq!(outcome.into_response().description, "INVALID_TOKEN");
}

#[tokio::test(start_paused = true)]
async fn test_race_lone_command_byte_then_close() {
    let (mut gateway, mut client) = tokio::io::duplex(64);
    gateway.write_all(&[0x08]).await.unwrap();
    drop(gateway);

    let outcome = race_read(&mut client, DEFAULT_RESPONSE_GRACE).await;
    assert_eq!(outcome, Correlation::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_race_unknown_status_has_blank_description() {
    let (mut gateway, mut client) = tokio::io::duplex(64);
    gateway.write_all(&[0x08, 0x09, 0, 0, 0, 7]).await.unwrap();

    let response = race_read(&mut client, DEFAULT_RESPONSE_GRACE)
        .await
        .into_response();
    assert!(!response.success);
    assert_eq!(response.description, "");
}

#[tokio::test]
async fn test_send_writes_frames_in_order() {
    let (mut gateway, client) = tokio::io::duplex(1024);
    let mut session = GatewaySession::from_stream("test:2195", client);
    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(session.gateway(), "test:2195");

    session
        .send(&[vec![1, 2, 3], vec![4, 5], vec![6]])
        .await
        .unwrap();
    session.close().await;

    let mut received = Vec::new();
    gateway.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_send_after_peer_gone_fails() {
    let (gateway, client) = tokio::io::duplex(16);
    drop(gateway);

    let mut session = GatewaySession::from_stream("test:2195", client);
    let err = session.send(&[vec![0; 64]]).await.unwrap_err();
    assert!(matches!(err, ApnsError::Send(_)));
}

#[tokio::test]
async fn test_closed_session_rejects_io() {
    let mut session = GatewaySession::new("test:2195");
    assert_eq!(session.state(), SessionState::Closed);

    assert!(matches!(
        session.send(&[vec![1]]).await,
        Err(ApnsError::NotOpen)
    ));
    assert!(matches!(
        session.await_response(Duration::from_millis(1)).await,
        Err(ApnsError::NotOpen)
    ));
    assert!(session.stream_mut().is_err());
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mut never_opened = GatewaySession::new("test:2195");
    never_opened.close().await;
    never_opened.close().await;
    assert_eq!(never_opened.state(), SessionState::Closed);

    let (_gateway, client) = tokio::io::duplex(16);
    let mut session = GatewaySession::from_stream("test:2195", client);
    session.close().await;
    session.close().await;
    assert_eq!(session.state(), SessionState::Closed);
    assert!(matches!(
        session.send(&[vec![1]]).await,
        Err(ApnsError::NotOpen)
    ));
}

#[tokio::test]
async fn test_dial_refused_leaves_session_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let mut session = GatewaySession::new(addr);
    let err = session.dial(anonymous_config()).await.unwrap_err();
    assert!(matches!(err, ApnsError::Dial { .. }));
    assert_eq!(session.state(), SessionState::Closed);
}

#[tokio::test]
async fn test_failed_handshake_leaves_session_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        // accept and hang up without speaking TLS
        if let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    let mut session = GatewaySession::new(addr);
    let err = session.dial(anonymous_config()).await.unwrap_err();
    assert!(matches!(err, ApnsError::Handshake(_)));
    assert_eq!(session.state(), SessionState::Closed);
}

#[tokio::test]
async fn test_tls_dialer_reports_dial_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let dialer = TlsDialer::new(anonymous_config());
    assert!(matches!(
        dialer.dial(&addr).await,
        Err(ApnsError::Dial { .. })
    ));
}
