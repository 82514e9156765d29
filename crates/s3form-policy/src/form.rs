//! Form-field bundle for the client.
//!
//! [`FormFields`] carries everything an HTML form (or any other client) needs
//! to post a file directly to the bucket. It serializes to a flat JSON object
//! whose field names are fixed:
//!
//! ```json
//! {
//!   "url": "http://mybucket.s3.amazonaws.com/",
//!   "success_action_redirect": "",
//!   "x_amz_algorithm": "AWS4-HMAC-SHA256",
//!   "x_amz_credential": "AKIA123/20240305/us-east-1/s3/aws4_request",
//!   "aws_access_key_id": "AKIA123",
//!   "signature": "…",
//!   "policy": "…",
//!   "x_amz_date": "20240305T000000Z",
//!   "key": ""
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use s3form_auth::sigv4::ALGORITHM;

use crate::condition::keys;
use crate::error::PolicyResult;
use crate::session::SigningSession;

/// Signed form fields for one browser-based upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    /// Bucket endpoint the form posts to.
    pub url: String,
    /// Echoed `success_action_redirect` condition, empty when absent.
    pub success_action_redirect: String,
    /// Signing algorithm.
    pub x_amz_algorithm: String,
    /// Credential string.
    pub x_amz_credential: String,
    /// Access key ID.
    pub aws_access_key_id: String,
    /// Hex signature over `policy`.
    pub signature: String,
    /// Base64 policy document.
    pub policy: String,
    /// ISO-compact signing date.
    pub x_amz_date: String,
    /// Echoed `key` condition, empty when absent.
    pub key: String,
}

impl FormFields {
    /// Build the bundle from a session.
    ///
    /// `policy` and `signature` come from the same cached encoding.
    pub fn assemble(session: &SigningSession<'_>) -> PolicyResult<Self> {
        let config = session.config();
        let policy = session.policy()?.to_owned();
        let signature = session.signature()?;

        debug!(
            bucket = %config.bucket,
            conditions = session.conditions().len(),
            "assembled upload form fields"
        );

        Ok(Self {
            url: config.bucket_url(),
            success_action_redirect: session
                .condition(keys::SUCCESS_ACTION_REDIRECT)
                .unwrap_or_default()
                .to_owned(),
            x_amz_algorithm: ALGORITHM.to_owned(),
            x_amz_credential: session.credential().to_owned(),
            aws_access_key_id: config.access_key.clone(),
            signature,
            policy,
            x_amz_date: session.iso_date().to_owned(),
            key: session.condition(keys::KEY).unwrap_or_default().to_owned(),
        })
    }

    /// Serialize the bundle as a flat JSON object.
    pub fn to_json(&self) -> PolicyResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
