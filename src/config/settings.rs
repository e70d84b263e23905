use serde::Deserialize;

pub const PUSH_GATEWAY: &str = "gateway.push.apple.com:2195";
pub const SANDBOX_PUSH_GATEWAY: &str = "gateway.sandbox.push.apple.com:2195";
pub const FEEDBACK_GATEWAY: &str = "feedback.push.apple.com:2196";
pub const SANDBOX_FEEDBACK_GATEWAY: &str = "feedback.sandbox.push.apple.com:2196";
pub const HTTP_GATEWAY: &str = "api.push.apple.com";
pub const SANDBOX_HTTP_GATEWAY: &str = "api.development.push.apple.com";

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

/// Where to connect and which credential to present.
#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub sandbox: bool,
    pub cert_file: String,
    pub key_file: String,
    /// How long the legacy session waits for an error frame before it
    /// declares a batch delivered.
    pub response_grace_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub topic: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl GatewaySettings {
    pub fn push_gateway(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_PUSH_GATEWAY
        } else {
            PUSH_GATEWAY
        }
    }

    pub fn feedback_gateway(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_FEEDBACK_GATEWAY
        } else {
            FEEDBACK_GATEWAY
        }
    }

    pub fn http_gateway(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_HTTP_GATEWAY
        } else {
            HTTP_GATEWAY
        }
    }

    pub fn response_grace(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.response_grace_ms)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub gateway: Option<PartialGatewaySettings>,
    pub http: Option<PartialHttpSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialGatewaySettings {
    pub sandbox: Option<bool>,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
    pub response_grace_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHttpSettings {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway: GatewaySettings {
                sandbox: false,
                cert_file: "cert.pem".to_string(),
                key_file: "key.pem".to_string(),
                response_grace_ms: 5000,
            },
            http: HttpSettings {
                topic: String::new(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
