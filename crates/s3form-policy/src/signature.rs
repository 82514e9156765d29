//! POST policy signature.

use s3form_auth::sigv4::{derive_signing_key, sign_hex};
use s3form_core::S3FormConfig;

/// Sign an already-encoded base64 policy with the account's derived key.
///
/// The policy must be the exact string handed to the client; callers obtain
/// it from the session's policy cache rather than re-encoding it.
#[must_use]
pub fn compute_signature(config: &S3FormConfig, date: &str, base64_policy: &str) -> String {
    let signing_key = derive_signing_key(&config.secret_key, date, &config.region);
    sign_hex(&signing_key, base64_policy)
}
