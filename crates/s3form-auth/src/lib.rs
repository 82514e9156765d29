//! AWS Signature Version 4 primitives for S3 browser-based uploads.
//!
//! This crate holds the pure, leaf-level pieces of the POST policy signing
//! scheme: date formatting and the HMAC-SHA256 key-derivation chain. Nothing
//! here performs I/O or reads the clock; every function is a deterministic
//! function of its arguments.
//!
//! # Usage
//!
//! ```rust
//! use s3form_auth::date::{compact_date, iso_compact};
//! use s3form_auth::sigv4::{derive_signing_key, sign_hex};
//!
//! let instant = chrono::DateTime::parse_from_rfc3339("2024-03-05T14:30:00Z")
//!     .unwrap()
//!     .to_utc();
//! let date = compact_date(instant);
//! assert_eq!(iso_compact(&date), "20240305T000000Z");
//!
//! let key = derive_signing_key("secret", &date, "us-east-1");
//! let signature = sign_hex(&key, "eyJjb25kaXRpb25zIjpbXX0=");
//! assert_eq!(signature.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`date`] - Compact, ISO-compact and policy-expiration date strings
//! - [`sigv4`] - Signing-key derivation, hex signatures and the credential string

pub mod date;
pub mod sigv4;

pub use date::{compact_date, expiration_timestamp, iso_compact};
pub use sigv4::{
    ALGORITHM, CREDENTIAL_SCOPE, credential_string, derive_signing_key, hmac_sha256, sign_hex,
};
