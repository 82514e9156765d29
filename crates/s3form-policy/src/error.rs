//! Error types for policy construction.

/// Errors that can occur while building a signed POST policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The canonical policy document could not be serialized.
    ///
    /// The document only holds strings, so this indicates a programming
    /// defect. It is surfaced rather than replaced by an empty policy.
    #[error("failed to serialize policy document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
