//! Error types for S3Form configuration.

/// Errors raised while loading or validating an [`S3FormConfig`](crate::S3FormConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required field is empty.
    #[error("configuration error: {0} must not be empty")]
    MissingField(&'static str),

    /// An environment variable holds a value that cannot be parsed.
    #[error("configuration error: invalid value for {name}: {value}")]
    InvalidValue {
        /// The variable name.
        name: &'static str,
        /// The rejected raw value.
        value: String,
    },
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
