//! AWS SDK backed storage collaborator for S3Form.
//!
//! [`S3Transfer`] implements [`s3form_policy::Transfer`] on top of
//! `aws-sdk-s3`, configured from the same [`s3form_core::S3FormConfig`] the
//! signing sessions use: static credentials, region and the acceleration
//! flag. It also answers the bucket-region question a server asks at startup
//! so the credential scope it signs matches where the bucket lives.

pub mod client;
pub mod error;

pub use client::S3Transfer;
pub use error::TransferError;
