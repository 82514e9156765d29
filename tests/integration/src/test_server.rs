//! Form server integration tests.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    use crate::server_url;

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_healthy() {
        let resp = reqwest::get(format!("{}/health", server_url()))
            .await
            .expect("health request");
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().contains_key("x-request-id"));

        let json: serde_json::Value = resp.json().await.expect("json body");
        assert_eq!(json["status"], "running");
        assert_eq!(json["service"], "s3form");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_issue_upload_form() {
        let resp = reqwest::Client::new()
            .post(format!("{}/upload-form", server_url()))
            .json(&serde_json::json!({
                "expires_in_minutes": 5,
                "conditions": [{"key": "uploads/report.pdf"}, {"acl": "private"}],
            }))
            .send()
            .await
            .expect("upload-form request");
        assert_eq!(resp.status(), 200);

        let json: serde_json::Value = resp.json().await.expect("json body");
        assert_eq!(json["key"], "uploads/report.pdf");
        assert_eq!(json["x_amz_algorithm"], "AWS4-HMAC-SHA256");
        assert!(
            json["x_amz_credential"]
                .as_str()
                .expect("string")
                .ends_with("/s3/aws4_request")
        );

        let policy = BASE64
            .decode(json["policy"].as_str().expect("string"))
            .expect("valid base64");
        let document: serde_json::Value = serde_json::from_slice(&policy).expect("policy json");
        let conditions = document["conditions"].as_array().expect("array");
        assert_eq!(conditions.len(), 6);
        assert_eq!(conditions[5]["acl"], "private");
        assert!(
            document["expiration"]
                .as_str()
                .expect("string")
                .ends_with(".000Z")
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_out_of_range_expiry() {
        let resp = reqwest::Client::new()
            .post(format!("{}/upload-form", server_url()))
            .json(&serde_json::json!({ "expires_in_minutes": 0 }))
            .send()
            .await
            .expect("upload-form request");
        assert_eq!(resp.status(), 400);

        let json: serde_json::Value = resp.json().await.expect("json body");
        assert_eq!(json["error"], "InvalidExpiry");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_unknown_route() {
        let resp = reqwest::get(format!("{}/nothing-here", server_url()))
            .await
            .expect("request");
        assert_eq!(resp.status(), 404);
    }
}
