mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{
    FEEDBACK_GATEWAY, GatewaySettings, HTTP_GATEWAY, HttpSettings, LoggingSettings, PUSH_GATEWAY,
    SANDBOX_FEEDBACK_GATEWAY, SANDBOX_HTTP_GATEWAY, SANDBOX_PUSH_GATEWAY, Settings,
};

/// Loads the configuration from `config/default` and `PUSHWIRE__*` environment
/// variables, then fills whatever is missing from `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("PUSHWIRE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    let gateway = partial.gateway.as_ref();
    let http = partial.http.as_ref();
    let logging = partial.logging.as_ref();

    Ok(Settings {
        gateway: GatewaySettings {
            sandbox: gateway
                .and_then(|g| g.sandbox)
                .unwrap_or(default.gateway.sandbox),
            cert_file: gateway
                .and_then(|g| g.cert_file.clone())
                .unwrap_or(default.gateway.cert_file),
            key_file: gateway
                .and_then(|g| g.key_file.clone())
                .unwrap_or(default.gateway.key_file),
            response_grace_ms: gateway
                .and_then(|g| g.response_grace_ms)
                .unwrap_or(default.gateway.response_grace_ms),
        },
        http: HttpSettings {
            topic: http
                .and_then(|h| h.topic.clone())
                .unwrap_or(default.http.topic),
        },
        logging: LoggingSettings {
            level: logging
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}
