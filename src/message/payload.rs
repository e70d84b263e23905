//! Notification payloads.
//!
//! A payload is a JSON object with one reserved key, `"aps"`, holding the
//! typed alert/badge/sound/category record, next to any number of custom
//! fields. `PayloadMap` keeps the two apart and joins them when serialized.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::utils::ApnsError;

pub const APS_KEY: &str = "aps";
pub const DEFAULT_BADGE: u32 = 1;
pub const DEFAULT_SOUND: &str = "Default";

/// Localizable alert dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(
        rename = "launch-image",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub launch_image: String,
    #[serde(
        rename = "action-loc-key",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub action_loc_key: String,
    #[serde(rename = "loc-key", default, skip_serializing_if = "String::is_empty")]
    pub loc_key: String,
    #[serde(rename = "loc-args", default, skip_serializing_if = "Vec::is_empty")]
    pub loc_args: Vec<String>,
}

/// The value of `aps.alert`: either a plain string or a full dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertContent {
    Text(String),
    Rich(Alert),
}

impl From<&str> for AlertContent {
    fn from(text: &str) -> Self {
        AlertContent::Text(text.to_string())
    }
}

impl From<String> for AlertContent {
    fn from(text: String) -> Self {
        AlertContent::Text(text)
    }
}

impl From<Alert> for AlertContent {
    fn from(alert: Alert) -> Self {
        AlertContent::Rich(alert)
    }
}

/// The `aps` dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertContent>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub badge: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sound: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(
        rename = "content-available",
        default,
        skip_serializing_if = "is_zero"
    )]
    pub content_available: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl Payload {
    pub fn with_alert(alert: impl Into<AlertContent>) -> Self {
        Self {
            alert: Some(alert.into()),
            ..Self::default()
        }
    }
}

/// Custom fields plus the reserved `aps` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadMap {
    aps: Option<Payload>,
    fields: Map<String, Value>,
}

impl PayloadMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `aps` entry.
    ///
    /// A payload without an alert is ignored. Otherwise a zero badge becomes
    /// `DEFAULT_BADGE` and an empty sound becomes `DEFAULT_SOUND`.
    pub fn set_aps(&mut self, mut payload: Payload) {
        if payload.alert.is_none() {
            return;
        }
        if payload.badge == 0 {
            payload.badge = DEFAULT_BADGE;
        }
        if payload.sound.is_empty() {
            payload.sound = DEFAULT_SOUND.to_string();
        }
        self.aps = Some(payload);
    }

    /// Adds a custom key. Empty keys and `"aps"` are ignored.
    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) {
        if key.is_empty() || key == APS_KEY {
            return;
        }
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn aps(&self) -> Option<&Payload> {
        self.aps.as_ref()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has_aps(&self) -> bool {
        self.aps.is_some()
    }

    pub fn to_json(&self) -> Result<Vec<u8>, ApnsError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Serialize for PayloadMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.aps.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(aps) = &self.aps {
            map.serialize_entry(APS_KEY, aps)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
