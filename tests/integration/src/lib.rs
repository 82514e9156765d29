//! Integration tests for S3Form.
//!
//! Server tests require a running `s3form-server` at `localhost:4580`.
//! Upload tests require an S3-compatible endpoint (LocalStack, MinIO, ...)
//! at `localhost:4566` that accepts the `test`/`test` credentials.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p s3form-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use s3form_core::S3FormConfig;
use s3form_policy::FormFields;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Base URL of the form server.
#[must_use]
pub fn server_url() -> String {
    init_tracing();
    std::env::var("S3FORM_SERVER_URL").unwrap_or_else(|_| "http://localhost:4580".to_owned())
}

/// Endpoint URL of the S3-compatible backend.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Account configuration bound to `bucket` with the emulator credentials.
#[must_use]
pub fn test_config(bucket: &str) -> S3FormConfig {
    S3FormConfig::builder()
        .access_key("test".into())
        .secret_key("test".into())
        .bucket(bucket.to_owned())
        .build()
}

/// Create a configured S3 client pointing at the local backend.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Delete all objects in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let Ok(resp) = client.list_objects_v2().bucket(bucket).send().await else {
        return;
    };

    for obj in resp.contents() {
        if let Some(key) = obj.key() {
            let _ = client.delete_object().bucket(bucket).key(key).send().await;
        }
    }

    let _ = client.delete_bucket().bucket(bucket).send().await;
}

/// Build the multipart body a browser would post for `fields`.
///
/// `extra` holds any additional condition fields (e.g. `acl`) in the order
/// they were signed. The file part goes last, as S3 requires.
#[must_use]
pub fn browser_form(
    fields: &FormFields,
    extra: &[(&str, &str)],
    file_name: &str,
    content: &'static [u8],
) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new()
        .text("key", fields.key.clone())
        .text("x-amz-algorithm", fields.x_amz_algorithm.clone())
        .text("x-amz-credential", fields.x_amz_credential.clone())
        .text("x-amz-date", fields.x_amz_date.clone())
        .text("policy", fields.policy.clone())
        .text("x-amz-signature", fields.signature.clone());

    for (name, value) in extra {
        form = form.text((*name).to_owned(), (*value).to_owned());
    }
    if !fields.success_action_redirect.is_empty() {
        form = form.text(
            "success_action_redirect",
            fields.success_action_redirect.clone(),
        );
    }

    form.part(
        "file",
        reqwest::multipart::Part::bytes(content).file_name(file_name.to_owned()),
    )
}

mod test_browser_upload;
mod test_server;
mod test_transfer;
