//! Policy conditions.
//!
//! A [`ConditionSet`] is an append-only, ordered list of single-key
//! conditions. Order is part of the canonical policy JSON and therefore of the
//! signature, so the set is a plain sequence and never a map. Keys are not
//! deduplicated; lookups return the first match.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use s3form_core::S3FormConfig;

/// Condition keys recognized by S3 for POST uploads.
///
/// These are constants for callers; the set does not restrict keys to them.
pub mod keys {
    /// Object key (or exact upload path).
    pub const KEY: &str = "key";
    /// Base64 policy document.
    pub const POLICY: &str = "policy";
    /// Credential string.
    pub const X_AMZ_CREDENTIAL: &str = "x-amz-credential";
    /// Signing algorithm.
    pub const X_AMZ_ALGORITHM: &str = "x-amz-algorithm";
    /// Policy signature.
    pub const X_AMZ_SIGNATURE: &str = "x-amz-signature";
    /// ISO-compact signing date.
    pub const X_AMZ_DATE: &str = "x-amz-date";
    /// Canned ACL applied to the uploaded object.
    pub const ACL: &str = "acl";
    /// Target bucket.
    pub const BUCKET: &str = "bucket";
    /// Content type of the uploaded object.
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// URL the browser is redirected to after a successful upload.
    pub const SUCCESS_ACTION_REDIRECT: &str = "success_action_redirect";
    /// HTTP status returned after a successful upload when no redirect is set.
    pub const SUCCESS_ACTION_STATUS: &str = "success_action_status";
    /// Session token for temporary credentials.
    pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
}

/// A single `key: value` condition.
///
/// Serializes as a one-entry JSON object, `{"acl":"public-read"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Condition key, e.g. `acl`.
    pub key: String,
    /// Exact value the upload must carry.
    pub value: String,
}

impl Condition {
    /// Create a condition.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConditionVisitor)
    }
}

struct ConditionVisitor;

impl<'de> Visitor<'de> for ConditionVisitor {
    type Value = Condition;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with exactly one string entry")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Condition, A::Error> {
        let Some((key, value)) = map.next_entry::<String, String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        if map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(Condition { key, value })
    }
}

/// Ordered sequence of conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSet(Vec<Condition>);

impl ConditionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the mandatory conditions every policy starts with.
    ///
    /// Always exactly four, in this order: bucket, credential, algorithm,
    /// date.
    #[must_use]
    pub fn with_defaults(
        config: &S3FormConfig,
        credential: &str,
        iso_date: &str,
        algorithm: &str,
    ) -> Self {
        let mut set = Self(Vec::with_capacity(8));
        set.add(keys::BUCKET, &config.bucket)
            .add(keys::X_AMZ_CREDENTIAL, credential)
            .add(keys::X_AMZ_ALGORITHM, algorithm)
            .add(keys::X_AMZ_DATE, iso_date);
        set
    }

    /// Append a condition. Existing entries with the same key are kept.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.push(Condition::new(key, value));
        self
    }

    /// Value of the first condition with `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.value.as_str())
    }

    /// Iterate over the conditions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.0.iter()
    }

    /// Number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<Condition> for ConditionSet {
    fn extend<I: IntoIterator<Item = Condition>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ConditionSet {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
