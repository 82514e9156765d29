//! API errors and their HTTP mapping.

use s3form_policy::PolicyError;

/// Errors returned to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is not a valid upload-form request.
    #[error("invalid request body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The request body exceeds the size limit.
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The requested policy lifetime is out of range.
    #[error("expires_in_minutes must be between 1 and {max}, got {minutes}")]
    InvalidExpiry {
        /// Requested lifetime.
        minutes: i32,
        /// Configured upper bound.
        max: i32,
    },

    /// Building the signed policy failed.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// No route matches the path.
    #[error("no route for {0}")]
    NotFound(String),

    /// The route exists but not for this method.
    #[error("method {0} not allowed")]
    MethodNotAllowed(http::Method),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> http::StatusCode {
        match self {
            Self::InvalidJson(_) | Self::InvalidExpiry { .. } | Self::BodyRead(_) => {
                http::StatusCode::BAD_REQUEST
            }
            Self::BodyTooLarge(_) => http::StatusCode::PAYLOAD_TOO_LARGE,
            Self::Policy(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => http::StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Stable error code for the response body.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "InvalidRequest",
            Self::BodyTooLarge(_) => "RequestTooLarge",
            Self::BodyRead(_) => "InvalidRequestBody",
            Self::InvalidExpiry { .. } => "InvalidExpiry",
            Self::Policy(_) => "InternalError",
            Self::NotFound(_) => "NotFound",
            Self::MethodNotAllowed(_) => "MethodNotAllowed",
        }
    }
}
