//! Storage collaborator integration tests.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;
    use s3form_policy::Transfer;
    use s3form_transfer::S3Transfer;

    use crate::{cleanup_bucket, create_test_bucket, endpoint_url, s3_client, test_config};

    #[tokio::test]
    #[ignore = "requires running S3 backend"]
    async fn test_should_upload_and_presign_download() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "transfer").await;
        let transfer = S3Transfer::with_endpoint(&test_config(&bucket), &endpoint_url());

        let url = transfer
            .upload_and_presign(
                "docs/readme.txt",
                "text/plain",
                Bytes::from_static(b"presigned content"),
                Duration::from_secs(300),
            )
            .await
            .expect("upload and presign");
        assert!(transfer.object_exists("docs/readme.txt").await.expect("head"));

        let body = reqwest::get(&url)
            .await
            .expect("presigned get")
            .bytes()
            .await
            .expect("body");
        assert_eq!(body.as_ref(), b"presigned content");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running S3 backend"]
    async fn test_should_report_missing_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "missing").await;
        let transfer = S3Transfer::with_endpoint(&test_config(&bucket), &endpoint_url());

        assert!(!transfer.object_exists("absent.bin").await.expect("head"));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running S3 backend"]
    async fn test_should_resolve_bucket_region() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "region").await;
        let transfer = S3Transfer::with_endpoint(&test_config(&bucket), &endpoint_url());

        let region = transfer.bucket_region().await.expect("bucket region");
        assert_eq!(region, "us-east-1");

        cleanup_bucket(&client, &bucket).await;
    }
}
