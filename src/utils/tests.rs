use tracing_subscriber::EnvFilter;

use super::error::ApnsError;
use super::logging;
use crate::config::LoggingSettings;

fn logging_settings(level: &str) -> LoggingSettings {
    LoggingSettings {
        level: level.to_string(),
    }
}

#[test]
fn test_level_names() {
    assert_eq!(logging::level_name("DEBUG"), "debug");
    assert_eq!(logging::level_name("warning"), "warn");
    assert_eq!(logging::level_name(" trace "), "trace");
    assert_eq!(logging::level_name("off"), "off");
    assert_eq!(logging::level_name("verbose"), "info");
    assert_eq!(logging::level_name(""), "info");
}

#[test]
fn test_filter_scopes_level_to_crate() {
    let directive = logging::filter_directive(&logging_settings("debug"));
    assert_eq!(directive, "pushwire=debug,warn");
    assert!(EnvFilter::try_new(&directive).is_ok());

    let fallback = logging::filter_directive(&logging_settings("loud"));
    assert_eq!(fallback, "pushwire=info,warn");
}

#[test]
fn test_init_is_repeatable() {
    logging::init(&logging_settings("info"));
    logging::init(&logging_settings("trace"));
    assert!(tracing::dispatcher::has_been_set());
}

#[test]
fn test_reason_codes_for_local_failures() {
    assert_eq!(ApnsError::EmptyPayload.reason_code(), "PayloadEmpty");
    assert_eq!(
        ApnsError::PayloadTooLarge {
            size: 5000,
            limit: 4096
        }
        .reason_code(),
        "PayloadTooLarge"
    );
    assert_eq!(ApnsError::MissingTopic.reason_code(), "MissingTopic");
    assert_eq!(
        ApnsError::ServiceUnavailable.reason_code(),
        "ServiceUnavailable"
    );
    assert_eq!(
        ApnsError::Transport("connection reset".into()).reason_code(),
        "ServiceUnavailable"
    );
}

#[test]
fn test_serialization_failure_is_not_an_empty_payload() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert_eq!(
        ApnsError::Serialization(serde_err).reason_code(),
        "InternalServerError"
    );
}

#[test]
fn test_payload_too_large_message() {
    let err = ApnsError::PayloadTooLarge {
        size: 300,
        limit: 255,
    };
    assert_eq!(
        err.to_string(),
        "payload is 300 bytes, larger than the 255 byte limit"
    );
}
