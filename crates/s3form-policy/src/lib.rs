//! Signed POST policies for S3 browser-based uploads.
//!
//! A browser-based upload lets a client post a file straight to a bucket using
//! HTML form fields signed by the server. This crate builds those fields:
//!
//! ```text
//! S3FormConfig ──> SigningSession ──> ConditionSet ──> policy (base64 JSON)
//!                                                           │
//!                                  signing key ────────> signature
//!                                                           │
//!                                                      FormFields
//! ```
//!
//! A [`SigningSession`] captures the clock once, seeds the four mandatory
//! conditions, accepts any number of caller conditions, and finally yields a
//! [`FormFields`] bundle. The base64 policy is encoded once and the signature
//! is always computed over exactly those bytes.
//!
//! # Usage
//!
//! ```rust
//! use s3form_core::S3FormConfig;
//! use s3form_policy::{SigningSession, condition::keys};
//!
//! let config = S3FormConfig::builder()
//!     .access_key("AKIA123".into())
//!     .secret_key("secret".into())
//!     .bucket("mybucket".into())
//!     .build();
//!
//! let mut session = SigningSession::new(&config, 10);
//! session
//!     .add_condition(keys::KEY, "uploads/photo.png")
//!     .add_condition(keys::ACL, "public-read");
//!
//! let fields = session.form_fields().unwrap();
//! assert_eq!(fields.key, "uploads/photo.png");
//! assert_eq!(fields.url, "http://mybucket.s3.amazonaws.com/");
//! ```
//!
//! # Modules
//!
//! - [`condition`] - Ordered condition set and recognized condition keys
//! - [`policy`] - Canonical policy document and its memoized base64 encoding
//! - [`signature`] - Policy signature computation
//! - [`session`] - Per-request signing session
//! - [`form`] - Form-field bundle returned to the client
//! - [`transfer`] - Interface to the storage collaborator that moves bytes

pub mod condition;
pub mod error;
pub mod form;
pub mod policy;
pub mod session;
pub mod signature;
pub mod transfer;

pub use condition::{Condition, ConditionSet};
pub use error::{PolicyError, PolicyResult};
pub use form::FormFields;
pub use session::SigningSession;
pub use transfer::Transfer;
