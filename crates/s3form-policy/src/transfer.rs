//! Storage collaborator interface.
//!
//! Signing never performs I/O. Moving bytes, presigning downloads and asking
//! the bucket for its region are delegated to a [`Transfer`] implementation
//! bound to the same [`S3FormConfig`](s3form_core::S3FormConfig), so the
//! region and endpoint a session signs for match what the collaborator uses.

use std::time::Duration;

use bytes::Bytes;

/// Operations the storage backend provides around browser-based uploads.
#[async_trait::async_trait]
pub trait Transfer: Send + Sync {
    /// Error type returned by the backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `body` under `key` with the given content type.
    async fn upload(&self, key: &str, content_type: &str, body: Bytes) -> Result<(), Self::Error>;

    /// Produce a presigned GET URL for `key` valid for `expiry`.
    async fn presign_get(&self, key: &str, expiry: Duration) -> Result<String, Self::Error>;

    /// Region the bucket actually lives in.
    async fn bucket_region(&self) -> Result<String, Self::Error>;

    /// Upload an object, then return a presigned GET URL for it.
    async fn upload_and_presign(
        &self,
        key: &str,
        content_type: &str,
        body: Bytes,
        expiry: Duration,
    ) -> Result<String, Self::Error> {
        self.upload(key, content_type, body).await?;
        self.presign_get(key, expiry).await
    }
}
