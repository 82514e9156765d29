//! Server settings.
//!
//! Account settings (keys, bucket, region) live in
//! [`s3form_core::S3FormConfig`]; this module only covers how the HTTP
//! service itself runs.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use s3form_core::config::parse_bool;
use s3form_core::{ConfigError, ConfigResult};

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Bind address (e.g. `"0.0.0.0:4580"`).
    #[builder(default = String::from("0.0.0.0:4580"))]
    pub gateway_listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Policy lifetime used when a request does not ask for one.
    #[builder(default = 10)]
    pub default_expiry_minutes: i32,

    /// Longest policy lifetime a request may ask for.
    #[builder(default = 10_080)]
    pub max_expiry_minutes: i32,

    /// Whether to replace the configured region with the bucket's actual
    /// region at startup.
    #[builder(default = false)]
    pub resolve_bucket_region: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:4580"),
            log_level: String::from("info"),
            default_expiry_minutes: 10,
            max_expiry_minutes: 10_080,
            resolve_bucket_region: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:4580` |
    /// | `LOG_LEVEL` | `info` |
    /// | `DEFAULT_EXPIRY_MINUTES` | `10` |
    /// | `MAX_EXPIRY_MINUTES` | `10080` |
    /// | `RESOLVE_BUCKET_REGION` | `false` |
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_EXPIRY_MINUTES") {
            config.default_expiry_minutes = parse_minutes("DEFAULT_EXPIRY_MINUTES", &v)?;
        }
        if let Ok(v) = std::env::var("MAX_EXPIRY_MINUTES") {
            config.max_expiry_minutes = parse_minutes("MAX_EXPIRY_MINUTES", &v)?;
        }
        if let Ok(v) = std::env::var("RESOLVE_BUCKET_REGION") {
            config.resolve_bucket_region = parse_bool(&v);
        }

        Ok(config)
    }
}

/// Parse a positive number of minutes.
fn parse_minutes(name: &'static str, value: &str) -> ConfigResult<i32> {
    match value.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_owned(),
        }),
    }
}
