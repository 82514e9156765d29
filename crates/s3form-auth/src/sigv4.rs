//! AWS Signature Version 4 key derivation for S3 POST policies.
//!
//! A POST policy is signed with the same derived key as a regular SigV4
//! request, but the message is the base64 policy document itself rather than
//! a string-to-sign built from a canonical request:
//!
//! ```text
//! DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
//! DateRegionKey        = HMAC-SHA256(DateKey, region)
//! DateRegionServiceKey = HMAC-SHA256(DateRegionKey, "s3")
//! SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
//! Signature            = hex(HMAC-SHA256(SigningKey, base64_policy))
//! ```

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Signing algorithm identifier carried in the `x-amz-algorithm` field.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service and request type suffix of the credential scope.
pub const CREDENTIAL_SCOPE: &str = "s3/aws4_request";

/// Service name in the derivation chain.
const SERVICE: &str = "s3";

/// Final constant of the derivation chain.
const REQUEST_TYPE: &str = "aws4_request";

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 of `message` under `key` and return the raw bytes.
#[must_use]
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac =
        <HmacSha256 as KeyInit>::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Derive the S3 signing key for a secret, compact date and region.
///
/// # Examples
///
/// ```
/// use s3form_auth::sigv4::derive_signing_key;
///
/// let key = derive_signing_key(
///     "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
///     "20130524",
///     "us-east-1",
/// );
/// assert_eq!(key.len(), 32);
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, SERVICE.as_bytes());
    hmac_sha256(&date_region_service_key, REQUEST_TYPE.as_bytes())
}

/// Sign `message` with a derived key and return the lowercase hex signature.
#[must_use]
pub fn sign_hex(signing_key: &[u8], message: &str) -> String {
    hex::encode(hmac_sha256(signing_key, message.as_bytes()))
}

/// Build the `x-amz-credential` value: `access_key/date/region/s3/aws4_request`.
///
/// # Examples
///
/// ```
/// use s3form_auth::sigv4::credential_string;
///
/// assert_eq!(
///     credential_string("AKIA123", "20240305", "us-east-1"),
///     "AKIA123/20240305/us-east-1/s3/aws4_request",
/// );
/// ```
#[must_use]
pub fn credential_string(access_key: &str, date: &str, region: &str) -> String {
    format!("{access_key}/{date}/{region}/{CREDENTIAL_SCOPE}")
}
