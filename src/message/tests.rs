use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

use super::payload::{DEFAULT_BADGE, DEFAULT_SOUND};
use super::*;
use crate::utils::ApnsError;

const TOKEN: &str = "C4XOCR6kmbH4XJ9fMRm1hyt1iL7f0wqfJENdgTDdx+A=";

#[test]
fn test_device_token_round_trip() {
    for seed in 0u8..16 {
        let raw: Vec<u8> = (0u8..32).map(|i| i.wrapping_mul(seed).wrapping_add(seed)).collect();
        let encoded = STANDARD.encode(&raw);
        let token = DeviceToken::from_base64(&encoded).unwrap();
        assert_eq!(token.as_bytes().as_slice(), raw.as_slice());
        assert_eq!(token.to_base64(), encoded);
    }
}

#[test]
fn test_device_token_rejects_bad_input() {
    assert!(matches!(
        DeviceToken::from_base64(""),
        Err(ApnsError::MissingDeviceToken)
    ));
    assert!(matches!(
        DeviceToken::from_base64("not base64 at all!"),
        Err(ApnsError::InvalidDeviceToken(_))
    ));
    // 24 hex characters of an object id decode to 18 bytes
    assert!(matches!(
        DeviceToken::from_base64("5a1b2c3d4e5f60718293a4b5"),
        Err(ApnsError::InvalidDeviceToken(_))
    ));
}

#[test]
fn test_device_token_hex_is_lowercase() {
    let token = DeviceToken::from_bytes(&[0xAB; 32]).unwrap();
    assert_eq!(token.to_hex(), "ab".repeat(32));
}

#[test]
fn test_legacy_message_defaults() {
    let mut rng = StdRng::seed_from_u64(7);
    let message = LegacyMessage::with_rng(TOKEN, "", &mut rng).unwrap();
    assert_eq!(message.os_version, "7.0");
    assert_eq!(message.priority(), 10);
    assert_eq!(message.expiration, 0);
    assert!((0..9999).contains(&message.identifier));
    assert!(!message.payload().has_aps());
    assert_eq!(message.device_token().to_base64(), TOKEN);
}

#[test]
fn test_legacy_identifier_is_deterministic_with_seeded_rng() {
    let a = LegacyMessage::with_rng(TOKEN, "8.1", &mut StdRng::seed_from_u64(42)).unwrap();
    let b = LegacyMessage::with_rng(TOKEN, "8.1", &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a.identifier, b.identifier);
}

#[test]
fn test_legacy_message_rejects_short_token() {
    let short = STANDARD.encode([1u8; 16]);
    assert!(matches!(
        LegacyMessage::new(&short, "8.0"),
        Err(ApnsError::InvalidDeviceToken(_))
    ));
}

#[test]
fn test_set_payload_applies_defaults() {
    let mut message = LegacyMessage::new(TOKEN, "").unwrap();
    message.set_payload(Payload::with_alert("hello"));

    let aps = message.payload().aps().unwrap();
    assert_eq!(aps.badge, DEFAULT_BADGE);
    assert_eq!(aps.sound, DEFAULT_SOUND);
    assert_eq!(aps.sound, "Default");
}

#[test]
fn test_set_payload_keeps_explicit_values() {
    let mut message = LegacyMessage::new(TOKEN, "").unwrap();
    message.set_payload(Payload {
        alert: Some("hello".into()),
        badge: 4,
        sound: "chime.caf".to_string(),
        ..Payload::default()
    });

    let aps = message.payload().aps().unwrap();
    assert_eq!(aps.badge, 4);
    assert_eq!(aps.sound, "chime.caf");
}

#[test]
fn test_set_payload_without_alert_is_ignored() {
    let mut message = LegacyMessage::new(TOKEN, "").unwrap();
    message.set_payload(Payload {
        badge: 3,
        ..Payload::default()
    });
    assert!(!message.payload().has_aps());
}

#[test]
fn test_set_field_cannot_touch_aps() {
    let mut message = LegacyMessage::new(TOKEN, "").unwrap();
    message.set_payload(Payload::with_alert("real"));
    message.set_field("aps", json!({"alert": "spoofed"}));
    message.set_field("", 1);
    message.set_field("order_id", 1234);

    let encoded: Value = serde_json::from_slice(&message.payload().to_json().unwrap()).unwrap();
    assert_eq!(encoded["aps"]["alert"], "real");
    assert_eq!(encoded["order_id"], 1234);
    assert_eq!(encoded.as_object().unwrap().len(), 2);
    assert_eq!(message.payload().field("order_id"), Some(&json!(1234)));
    assert_eq!(message.payload().field("aps"), None);
}

#[test]
fn test_payload_json_shape() {
    let mut map = PayloadMap::new();
    map.set_aps(Payload {
        alert: Some(AlertContent::Rich(Alert {
            body: "Body".to_string(),
            loc_key: "GREETING".to_string(),
            loc_args: vec!["Jane".to_string()],
            ..Alert::default()
        })),
        content_available: 1,
        ..Payload::default()
    });

    let encoded: Value = serde_json::from_slice(&map.to_json().unwrap()).unwrap();
    assert_eq!(
        encoded,
        json!({
            "aps": {
                "alert": {"body": "Body", "loc-key": "GREETING", "loc-args": ["Jane"]},
                "badge": 1,
                "sound": "Default",
                "content-available": 1
            }
        })
    );
}

#[test]
fn test_http_message_construction_errors() {
    assert!(matches!(
        HttpMessage::new("device-1", "", "com.example.app", Payload::with_alert("a")),
        Err(ApnsError::MissingDeviceToken)
    ));
    assert!(matches!(
        HttpMessage::new("device-1", "5a1b2c3d4e5f60718293a4b5", "com.example.app", Payload::with_alert("a")),
        Err(ApnsError::InvalidDeviceToken(_))
    ));
    assert!(matches!(
        HttpMessage::new("device-1", TOKEN, "", Payload::with_alert("a")),
        Err(ApnsError::MissingTopic)
    ));
}

#[test]
fn test_http_message_defaults() {
    let now = chrono::Utc::now().timestamp();
    let message = HttpMessage::new(
        "device-1",
        TOKEN,
        "com.example.appID",
        Payload::with_alert("Sample alert"),
    )
    .unwrap();

    assert!(!message.apns_id.is_empty());
    assert!(uuid::Uuid::parse_str(&message.apns_id).is_ok());
    assert_eq!(message.topic, "com.example.appID");
    assert_eq!(message.priority, Priority::High);
    assert_eq!(message.priority.as_i8(), 10);
    assert!(message.expiration > now);
    assert_eq!(message.device_id(), "device-1");
    assert_eq!(message.device_token().to_base64(), TOKEN);

    let aps = message.payload().aps().unwrap();
    assert_eq!(aps.badge, 1);
    assert_eq!(aps.sound, "Default");
}

#[test]
fn test_http_message_ids_are_unique() {
    let a = HttpMessage::new("d", TOKEN, "t", Payload::with_alert("a")).unwrap();
    let b = HttpMessage::new("d", TOKEN, "t", Payload::with_alert("a")).unwrap();
    assert_ne!(a.apns_id, b.apns_id);
}

#[test]
fn test_http_message_without_alert_has_no_aps() {
    let message = HttpMessage::new("d", TOKEN, "t", Payload::default()).unwrap();
    assert!(!message.payload().has_aps());
}
