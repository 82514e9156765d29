//! `aws-sdk-s3` implementation of the storage collaborator.

use std::time::Duration;

use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use s3form_core::S3FormConfig;
use s3form_policy::Transfer;

use crate::error::TransferError;

/// Region reported for buckets whose location constraint is empty.
const DEFAULT_BUCKET_REGION: &str = "us-east-1";

/// Storage collaborator backed by an S3 client.
#[derive(Debug, Clone)]
pub struct S3Transfer {
    client: Client,
    bucket: String,
}

impl S3Transfer {
    /// Build a client from the account configuration.
    #[must_use]
    pub fn new(config: &S3FormConfig) -> Self {
        Self::from_builder(config, sdk_config_builder(config))
    }

    /// Build a client that talks to a custom endpoint with path-style
    /// addressing, e.g. MinIO or LocalStack.
    #[must_use]
    pub fn with_endpoint(config: &S3FormConfig, endpoint_url: &str) -> Self {
        let builder = sdk_config_builder(config)
            .endpoint_url(endpoint_url)
            .force_path_style(true);
        Self::from_builder(config, builder)
    }

    fn from_builder(config: &S3FormConfig, builder: aws_sdk_s3::config::Builder) -> Self {
        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }

    /// Bucket this collaborator operates on.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Check whether an object exists.
    pub async fn object_exists(&self, key: &str) -> Result<bool, TransferError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(TransferError::Request(format!(
                        "failed to check object existence: {service_err}"
                    )))
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl Transfer for S3Transfer {
    type Error = TransferError;

    async fn upload(&self, key: &str, content_type: &str, body: Bytes) -> Result<(), TransferError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| TransferError::Upload {
                key: key.to_owned(),
                message: e.to_string(),
            })?;

        info!(bucket = %self.bucket, key, content_type, size, "uploaded object");
        Ok(())
    }

    async fn presign_get(&self, key: &str, expiry: Duration) -> Result<String, TransferError> {
        let presigning_config = PresigningConfig::expires_in(expiry)
            .map_err(|e| TransferError::InvalidPresignDuration(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| TransferError::Presign {
                key: key.to_owned(),
                message: e.to_string(),
            })?;

        debug!(bucket = %self.bucket, key, expiry_secs = expiry.as_secs(), "presigned download");
        Ok(presigned.uri().to_string())
    }

    async fn bucket_region(&self) -> Result<String, TransferError> {
        let output = self
            .client
            .get_bucket_location()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                TransferError::Request(format!(
                    "failed to get bucket location: {}",
                    e.into_service_error()
                ))
            })?;

        let region = normalize_location(output.location_constraint().map(|c| c.as_str()));
        debug!(bucket = %self.bucket, region = %region, "resolved bucket region");
        Ok(region)
    }
}

/// SDK configuration with static credentials, region and acceleration.
fn sdk_config_builder(config: &S3FormConfig) -> aws_sdk_s3::config::Builder {
    let credentials = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "s3form",
    );

    aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .accelerate(config.accelerate)
}

/// Map a `LocationConstraint` to a region name.
///
/// S3 reports buckets in `us-east-1` with an empty constraint and some old
/// `eu-west-1` buckets with the legacy `EU` value.
fn normalize_location(constraint: Option<&str>) -> String {
    match constraint {
        None | Some("") => DEFAULT_BUCKET_REGION.to_owned(),
        Some("EU") => "eu-west-1".to_owned(),
        Some(region) => region.to_owned(),
    }
}
