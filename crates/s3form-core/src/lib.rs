//! Core types and configuration shared by all S3Form crates.
//!
//! The central type is [`S3FormConfig`], the immutable account context a
//! signing session is bound to: access key, secret key, bucket, region and the
//! transfer-acceleration flag. It is constructed once per process and shared
//! by reference across any number of concurrent sessions.

pub mod config;
pub mod error;

pub use config::S3FormConfig;
pub use error::{ConfigError, ConfigResult};
