//! Error types for the storage collaborator.

/// Errors returned by [`S3Transfer`](crate::S3Transfer).
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Storing an object failed.
    #[error("upload failed for {key}: {message}")]
    Upload {
        /// Object key.
        key: String,
        /// Backend error message.
        message: String,
    },

    /// The presign expiry is outside the range S3 accepts.
    #[error("invalid presign duration: {0}")]
    InvalidPresignDuration(String),

    /// Presigning a download failed.
    #[error("failed to presign {key}: {message}")]
    Presign {
        /// Object key.
        key: String,
        /// Backend error message.
        message: String,
    },

    /// Any other request to the bucket failed.
    #[error("bucket request failed: {0}")]
    Request(String),
}
