//! The upload-form HTTP service implementing hyper's `Service` trait.
//!
//! [`FormService`] handles:
//!
//! 1. Health check interception (`GET /health`)
//! 2. CORS preflight requests (`OPTIONS`)
//! 3. Bounded request body collection
//! 4. Issuing signed form fields (`POST /upload-form`)
//! 5. Common response headers (`x-request-id`, `Server`, CORS)
//! 6. JSON error formatting

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::service::Service;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use s3form_core::S3FormConfig;
use s3form_policy::{Condition, SigningSession};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Largest request body accepted by `POST /upload-form`.
pub const MAX_REQUEST_BODY: usize = 64 * 1024;

/// Response type produced by the service.
pub type FormResponse = http::Response<Full<Bytes>>;

/// Body of `POST /upload-form`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadFormRequest {
    /// Policy lifetime in minutes.
    pub expires_in_minutes: Option<i32>,
    /// Extra conditions appended after the defaults, in order.
    pub conditions: Vec<Condition>,
}

/// Shared state behind every connection.
#[derive(Debug)]
pub struct FormState {
    config: S3FormConfig,
    default_expiry_minutes: i32,
    max_expiry_minutes: i32,
}

impl FormState {
    /// Bind the account configuration to the server's expiry limits.
    #[must_use]
    pub fn new(config: S3FormConfig, server: &ServerConfig) -> Self {
        Self {
            config,
            default_expiry_minutes: server.default_expiry_minutes,
            max_expiry_minutes: server.max_expiry_minutes,
        }
    }
}

/// Hyper service issuing signed upload forms.
#[derive(Debug, Clone)]
pub struct FormService {
    state: Arc<FormState>,
}

impl FormService {
    /// Create a new service over the given state.
    #[must_use]
    pub fn new(state: FormState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }
}

impl Service<http::Request<Incoming>> for FormService {
    type Response = FormResponse;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let state = Arc::clone(&self.state);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();
            let (parts, incoming) = req.into_parts();

            let response = match collect_body(incoming).await {
                Ok(body) => process_request(&state, &parts.method, parts.uri.path(), &body, &request_id),
                Err(err) => {
                    warn!(error = %err, request_id, "failed to collect request body");
                    error_response(&err, &request_id)
                }
            };

            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Collect the body, refusing anything over [`MAX_REQUEST_BODY`].
async fn collect_body(incoming: Incoming) -> Result<Bytes, ApiError> {
    match Limited::new(incoming, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ApiError::BodyTooLarge(MAX_REQUEST_BODY))
        }
        Err(err) => Err(ApiError::BodyRead(err.to_string())),
    }
}

/// Route a request with an already collected body.
pub fn process_request(
    state: &FormState,
    method: &http::Method,
    path: &str,
    body: &[u8],
    request_id: &str,
) -> FormResponse {
    debug!(%method, path, request_id, "processing request");

    if *method == http::Method::GET && path == "/health" {
        return health_check_response();
    }

    if *method == http::Method::OPTIONS {
        return cors_preflight_response();
    }

    let result = match path {
        "/upload-form" if *method == http::Method::POST => {
            issue_form_fields(state, body, request_id)
        }
        "/upload-form" => Err(ApiError::MethodNotAllowed(method.clone())),
        _ => Err(ApiError::NotFound(path.to_owned())),
    };

    result.unwrap_or_else(|err| {
        debug!(error = %err, request_id, "request failed");
        error_response(&err, request_id)
    })
}

/// Open one session for the request and return its form fields.
fn issue_form_fields(
    state: &FormState,
    body: &[u8],
    request_id: &str,
) -> Result<FormResponse, ApiError> {
    let request: UploadFormRequest = if body.iter().all(u8::is_ascii_whitespace) {
        UploadFormRequest::default()
    } else {
        serde_json::from_slice(body)?
    };

    let minutes = request
        .expires_in_minutes
        .unwrap_or(state.default_expiry_minutes);
    if !(1..=state.max_expiry_minutes).contains(&minutes) {
        return Err(ApiError::InvalidExpiry {
            minutes,
            max: state.max_expiry_minutes,
        });
    }

    let mut session = SigningSession::new(&state.config, minutes);
    session.extend_conditions(request.conditions);
    let fields = session.form_fields()?;
    let json = fields.to_json()?;

    info!(
        bucket = %state.config.bucket,
        key = %fields.key,
        conditions = session.conditions().len(),
        expiration = %session.expiration(),
        request_id,
        "issued upload form"
    );

    Ok(json_response(http::StatusCode::OK, json))
}

fn json_response(status: http::StatusCode, body: String) -> FormResponse {
    http::Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("JSON response parts should be valid")
}

/// Produce a health check response.
fn health_check_response() -> FormResponse {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from_static(
            br#"{"status":"running","service":"s3form"}"#,
        )))
        .expect("static health response should be valid")
}

/// Produce a CORS preflight response.
fn cors_preflight_response() -> FormResponse {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .expect("static CORS response should be valid")
}

/// Render an [`ApiError`] as `{"error": code, "message": text}`.
fn error_response(err: &ApiError, request_id: &str) -> FormResponse {
    let body = serde_json::json!({
        "error": err.code(),
        "message": err.to_string(),
        "requestId": request_id,
    });
    json_response(err.status(), body.to_string())
}

/// Add common response headers to every response.
fn add_common_headers(mut response: FormResponse, request_id: &str) -> FormResponse {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }

    headers.insert("Server", http::header::HeaderValue::from_static("S3Form"));
    headers.insert(
        "Access-Control-Allow-Origin",
        http::header::HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Expose-Headers",
        http::header::HeaderValue::from_static("x-request-id"),
    );

    response
}
