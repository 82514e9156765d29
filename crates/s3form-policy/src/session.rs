//! Per-request signing session.
//!
//! A [`SigningSession`] is opened for one upload authorization request,
//! extended with caller conditions, turned into [`FormFields`] and dropped.
//! Every date string it exposes is derived from the single instant captured
//! when it was opened.
//!
//! The cached policy lives in a [`std::cell::OnceCell`], so a session is
//! `Send` but not `Sync`: it belongs to one request at a time.

use chrono::{DateTime, Utc};
use tracing::debug;

use s3form_auth::date::{compact_date, expiration_timestamp, iso_compact};
use s3form_auth::sigv4::{ALGORITHM, credential_string};
use s3form_core::S3FormConfig;

use crate::condition::{Condition, ConditionSet};
use crate::error::PolicyResult;
use crate::form::FormFields;
use crate::policy::PolicyCache;
use crate::signature::compute_signature;

/// Signing state for a single browser-based upload authorization.
#[derive(Debug)]
pub struct SigningSession<'a> {
    config: &'a S3FormConfig,
    created_at: DateTime<Utc>,
    minutes_to_expiry: i32,
    date: String,
    iso_date: String,
    credential: String,
    expiration: String,
    conditions: ConditionSet,
    policy: PolicyCache,
}

impl<'a> SigningSession<'a> {
    /// Open a session at the current time.
    #[must_use]
    pub fn new(config: &'a S3FormConfig, minutes_to_expiry: i32) -> Self {
        Self::at(config, Utc::now(), minutes_to_expiry)
    }

    /// Open a session at a fixed instant.
    ///
    /// The session starts with the four default conditions: bucket,
    /// credential, algorithm and date.
    #[must_use]
    pub fn at(config: &'a S3FormConfig, created_at: DateTime<Utc>, minutes_to_expiry: i32) -> Self {
        let date = compact_date(created_at);
        let iso_date = iso_compact(&date);
        let credential = credential_string(&config.access_key, &date, &config.region);
        let expiration = expiration_timestamp(created_at, minutes_to_expiry);
        let conditions = ConditionSet::with_defaults(config, &credential, &iso_date, ALGORITHM);

        debug!(
            bucket = %config.bucket,
            region = %config.region,
            credential = %credential,
            expiration = %expiration,
            "opened signing session"
        );

        Self {
            config,
            created_at,
            minutes_to_expiry,
            date,
            iso_date,
            credential,
            expiration,
            conditions,
            policy: PolicyCache::new(),
        }
    }

    /// Append a condition and drop any policy encoded so far.
    pub fn add_condition(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.conditions.add(key, value);
        self.policy.invalidate();
        self
    }

    /// Append several conditions in order.
    pub fn extend_conditions(&mut self, conditions: impl IntoIterator<Item = Condition>) -> &mut Self {
        self.conditions.extend(conditions);
        self.policy.invalidate();
        self
    }

    /// First value recorded for `key`, if any.
    #[must_use]
    pub fn condition(&self, key: &str) -> Option<&str> {
        self.conditions.lookup(key)
    }

    /// The conditions in policy order.
    #[must_use]
    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    /// The account configuration this session signs for.
    #[must_use]
    pub fn config(&self) -> &S3FormConfig {
        self.config
    }

    /// Instant captured when the session was opened.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Policy lifetime in minutes.
    #[must_use]
    pub fn minutes_to_expiry(&self) -> i32 {
        self.minutes_to_expiry
    }

    /// Compact `YYYYMMDD` signing date.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// ISO-compact `YYYYMMDDT000000Z` signing date.
    #[must_use]
    pub fn iso_date(&self) -> &str {
        &self.iso_date
    }

    /// `x-amz-credential` value.
    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Policy expiration timestamp.
    #[must_use]
    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    /// Base64 policy document, encoded on first use and cached.
    pub fn policy(&self) -> PolicyResult<&str> {
        self.policy.get_or_encode(&self.conditions, &self.expiration)
    }

    /// Hex signature over [`SigningSession::policy`].
    pub fn signature(&self) -> PolicyResult<String> {
        let policy = self.policy()?;
        Ok(compute_signature(self.config, &self.date, policy))
    }

    /// Assemble the form fields for the client.
    pub fn form_fields(&self) -> PolicyResult<FormFields> {
        FormFields::assemble(self)
    }
}
