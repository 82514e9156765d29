//! Account configuration.
//!
//! Provides [`S3FormConfig`], the read-only account context every signing
//! session is bound to. Values are loaded from environment variables using the
//! same names the AWS SDKs and MinIO test harnesses understand.

use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{ConfigError, ConfigResult};

/// Account context for browser-based uploads.
///
/// The secret key is never serialized and is redacted from the `Debug`
/// representation, so a config can be logged or echoed safely.
///
/// # Examples
///
/// ```
/// use s3form_core::S3FormConfig;
///
/// let config = S3FormConfig::builder()
///     .access_key("AKIA123".into())
///     .secret_key("secret".into())
///     .bucket("mybucket".into())
///     .build();
/// assert_eq!(config.region, "us-east-1");
/// assert_eq!(config.bucket_url(), "http://mybucket.s3.amazonaws.com/");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct S3FormConfig {
    /// Access key ID echoed to the client and embedded in the credential.
    pub access_key: String,

    /// Secret access key. Only ever used as a signing input.
    #[serde(skip_serializing, default)]
    pub secret_key: String,

    /// Target bucket name.
    pub bucket: String,

    /// Bucket region (e.g. `"us-east-1"`).
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Whether uploads go through the S3 transfer-acceleration endpoint.
    #[builder(default = false)]
    #[serde(default)]
    pub accelerate: bool,
}

impl Default for S3FormConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            bucket: String::new(),
            region: String::from("us-east-1"),
            accelerate: false,
        }
    }
}

impl fmt::Debug for S3FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3FormConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("accelerate", &self.accelerate)
            .finish()
    }
}

impl S3FormConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Fallback | Default |
    /// |----------|----------|---------|
    /// | `AWS_ACCESS_KEY_ID` | `ACCESS_KEY` | *(empty)* |
    /// | `AWS_SECRET_ACCESS_KEY` | `SECRET_KEY` | *(empty)* |
    /// | `S3_BUCKET` | | *(empty)* |
    /// | `AWS_REGION` | `DEFAULT_REGION` | `us-east-1` |
    /// | `S3_ACCELERATE` | | `false` |
    ///
    /// Missing values are left empty; call [`S3FormConfig::validate`] to
    /// reject an unusable config.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_any(&["AWS_ACCESS_KEY_ID", "ACCESS_KEY"]) {
            config.access_key = v;
        }
        if let Some(v) = env_any(&["AWS_SECRET_ACCESS_KEY", "SECRET_KEY"]) {
            config.secret_key = v;
        }
        if let Ok(v) = std::env::var("S3_BUCKET") {
            config.bucket = v;
        }
        if let Some(v) = env_any(&["AWS_REGION", "DEFAULT_REGION"]) {
            config.region = v;
        }
        if let Ok(v) = std::env::var("S3_ACCELERATE") {
            config.accelerate = parse_bool(&v);
        }

        config
    }

    /// Reject configurations that would produce a signed but unusable bundle.
    ///
    /// The signing path never calls this itself; it is up to the process
    /// constructing the config to decide whether to enforce it.
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("bucket", &self.bucket),
            ("region", &self.region),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Virtual-hosted bucket endpoint the upload form posts to.
    ///
    /// Always plain `http` and virtual-hosted style; acceleration switches the
    /// host to `s3-accelerate`.
    #[must_use]
    pub fn bucket_url(&self) -> String {
        let host = if self.accelerate {
            "s3-accelerate"
        } else {
            "s3"
        };
        format!("http://{}.{host}.amazonaws.com/", self.bucket)
    }
}

/// Return the first non-empty value among the given environment variables.
fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.is_empty())
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
