//! Browser-based upload tests: sign a form locally, post it to the backend.

#[cfg(test)]
mod tests {
    use s3form_policy::SigningSession;
    use s3form_policy::condition::keys;

    use crate::{browser_form, cleanup_bucket, create_test_bucket, endpoint_url, s3_client, test_config};

    #[tokio::test]
    #[ignore = "requires running S3 backend"]
    async fn test_should_accept_signed_form_upload() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "form").await;
        let config = test_config(&bucket);

        let mut session = SigningSession::new(&config, 5);
        session
            .add_condition(keys::KEY, "uploads/hello.txt")
            .add_condition(keys::SUCCESS_ACTION_STATUS, "201");
        let fields = session.form_fields().expect("form fields");

        let form = browser_form(
            &fields,
            &[("success_action_status", "201")],
            "hello.txt",
            b"hello from a browser form",
        );
        let resp = reqwest::Client::new()
            .post(format!("{}/{bucket}", endpoint_url()))
            .multipart(form)
            .send()
            .await
            .expect("form post");
        assert_eq!(resp.status(), 201, "backend should accept the signed form");

        let object = client
            .get_object()
            .bucket(&bucket)
            .key("uploads/hello.txt")
            .send()
            .await
            .expect("get_object");
        let data = object
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data.as_ref(), b"hello from a browser form");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running S3 backend"]
    async fn test_should_reject_tampered_policy() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "tamper").await;
        let config = test_config(&bucket);

        let mut session = SigningSession::new(&config, 5);
        session.add_condition(keys::KEY, "uploads/a.txt");
        let mut fields = session.form_fields().expect("form fields");
        fields.signature = "0".repeat(64);

        let resp = reqwest::Client::new()
            .post(format!("{}/{bucket}", endpoint_url()))
            .multipart(browser_form(&fields, &[], "a.txt", b"nope"))
            .send()
            .await
            .expect("form post");
        assert_eq!(resp.status(), 403);

        cleanup_bucket(&client, &bucket).await;
    }
}
