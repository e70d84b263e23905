//! CLI for Pushwire
//!
//! Subcommands:
//! - `send`: push one notification through the legacy binary gateway
//! - `send-http`: push one notification through the HTTP/2 gateway
//! - `feedback`: list devices reported by the feedback service

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use pushwire::client::{FeedbackClient, HttpPushClient, PushClient};
use pushwire::config::{Settings, load_config};
use pushwire::credentials::Credentials;
use pushwire::message::{HttpMessage, LegacyMessage, Payload};
use pushwire::session::TlsDialer;
use pushwire::utils::logging;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pushwire")]
enum Command {
    /// Send through the legacy binary gateway
    Send {
        /// Base64 device token
        #[arg(long)]
        token: String,
        /// Alert text
        #[arg(long)]
        alert: String,
        /// OS version of the device; 8.0 and later allow larger payloads
        #[arg(long, default_value = "7.0")]
        os_version: String,
    },
    /// Send through the HTTP/2 gateway
    SendHttp {
        /// Base64 device token
        #[arg(long)]
        token: String,
        /// Alert text
        #[arg(long)]
        alert: String,
        /// Bundle id of the app (defaults to `http.topic` from the configuration)
        #[arg(long)]
        topic: Option<String>,
        /// Caller-side identifier echoed on the response
        #[arg(long, default_value = "cli")]
        device_id: String,
    },
    /// Read the feedback service
    Feedback,
}

#[tokio::main]
async fn main() {
    let cmd = Command::parse();
    dotenvy::dotenv().ok();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };
    logging::init(&settings.logging);

    let result = match cmd {
        Command::Send {
            token,
            alert,
            os_version,
        } => run_send(&settings, &token, &alert, &os_version).await,
        Command::SendHttp {
            token,
            alert,
            topic,
            device_id,
        } => run_send_http(&settings, &token, &alert, topic, &device_id).await,
        Command::Feedback => run_feedback(&settings).await,
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn load_credentials(settings: &Settings) -> Result<Credentials, Box<dyn std::error::Error>> {
    Ok(Credentials::from_pem_files(
        Path::new(&settings.gateway.cert_file),
        Path::new(&settings.gateway.key_file),
    )?)
}

async fn run_send(
    settings: &Settings,
    token: &str,
    alert: &str,
    os_version: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = load_credentials(settings)?;
    let dialer = Arc::new(TlsDialer::from_credentials(&credentials)?);
    let client = PushClient::new(settings.gateway.push_gateway(), dialer)
        .with_response_grace(settings.gateway.response_grace());

    let mut message = LegacyMessage::new(token, os_version)?;
    message.set_payload(Payload::with_alert(alert));

    info!("Sending through {}", client.gateway());
    let response = client.send(&[message]).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_send_http(
    settings: &Settings,
    token: &str,
    alert: &str,
    topic: Option<String>,
    device_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = load_credentials(settings)?;
    let client = HttpPushClient::new(settings.gateway.http_gateway(), &credentials)?;

    let topic = topic.unwrap_or_else(|| settings.http.topic.clone());
    let message = HttpMessage::new(device_id, token, topic, Payload::with_alert(alert))?;

    info!("Sending through {}", client.gateway_host());
    for response in client.send(&[message]).await {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

async fn run_feedback(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = load_credentials(settings)?;
    let dialer = Arc::new(TlsDialer::from_credentials(&credentials)?);
    let client = FeedbackClient::new(settings.gateway.feedback_gateway(), dialer);

    let records = client.fetch().await?;
    if records.is_empty() {
        info!("No devices reported");
    }
    for record in records {
        println!("{} {}", record.timestamp.to_rfc3339(), record.device_token);
    }
    Ok(())
}
