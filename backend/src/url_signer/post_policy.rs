//! `SigV4` POST policies for browser-based uploads
//!
//! The Rust SDK only presigns single requests, so the upload form is built here:
//! a base64 policy document listing the conditions the form must satisfy, signed
//! with the same derived key `SigV4` uses for ordinary requests.

use std::collections::BTreeMap;
use std::time::Duration;

use aws_credential_types::Credentials;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use super::{SignerError, SignerResult, UploadDescriptor};

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm advertised in the form fields
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

const SERVICE: &str = "s3";
const TERMINATOR: &str = "aws4_request";

/// Conditions for a single-object upload
#[derive(Debug, Clone, Copy)]
pub struct PostPolicy<'a> {
    bucket: &'a str,
    key: &'a str,
    region: &'a str,
    expires_in: Duration,
}

impl<'a> PostPolicy<'a> {
    /// Creates a policy allowing exactly `key` to be uploaded into `bucket`
    #[must_use]
    pub const fn new(bucket: &'a str, key: &'a str, region: &'a str, expires_in: Duration) -> Self {
        Self {
            bucket,
            key,
            region,
            expires_in,
        }
    }

    /// Signs the policy at `now` and returns the form fields a client must submit.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::InvalidInput` if the expiry cannot be represented
    /// as a timestamp, or `SignerError::SigningError` if the HMAC cannot be computed
    pub fn sign(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> SignerResult<BTreeMap<String, String>> {
        let expires_in = TimeDelta::from_std(self.expires_in)
            .map_err(|e| SignerError::InvalidInput(format!("expiry out of range: {e}")))?;
        let expiration = now
            .checked_add_signed(expires_in)
            .ok_or_else(|| SignerError::InvalidInput("expiry overflows timestamp".to_string()))?;

        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let credential = format!(
            "{}/{date_stamp}/{}/{SERVICE}/{TERMINATOR}",
            credentials.access_key_id(),
            self.region
        );

        let mut fields = BTreeMap::from([
            ("key".to_string(), self.key.to_string()),
            ("x-amz-algorithm".to_string(), ALGORITHM.to_string()),
            ("x-amz-credential".to_string(), credential),
            ("x-amz-date".to_string(), amz_date),
        ]);
        if let Some(token) = credentials.session_token() {
            fields.insert("x-amz-security-token".to_string(), token.to_string());
        }

        let mut conditions = vec![json!({ "bucket": self.bucket })];
        conditions.extend(fields.iter().map(|(name, value)| json!({ name: value })));

        let document = json!({
            "expiration": expiration.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "conditions": Value::Array(conditions),
        });
        let policy = STANDARD.encode(document.to_string());

        let key = signing_key(
            credentials.secret_access_key(),
            &date_stamp,
            self.region,
            SERVICE,
        )?;
        let signature = hex::encode(hmac_sha256(&key, policy.as_bytes())?);

        fields.insert("policy".to_string(), policy);
        fields.insert("x-amz-signature".to_string(), signature);

        Ok(fields)
    }

    /// Signs the policy and pairs the fields with the form action URL
    ///
    /// # Errors
    ///
    /// See [`PostPolicy::sign`]
    pub fn descriptor(
        &self,
        credentials: &Credentials,
        endpoint_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> SignerResult<UploadDescriptor> {
        Ok(UploadDescriptor {
            url: form_action_url(self.bucket, self.region, endpoint_url),
            fields: self.sign(credentials, now)?,
        })
    }
}

/// Derives the `SigV4` signing key for `date_stamp` (`YYYYMMDD`), region and service
///
/// # Errors
///
/// Returns `SignerError::SigningError` if the HMAC cannot be keyed
pub fn signing_key(
    secret_access_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> SignerResult<Vec<u8>> {
    let k_date = hmac_sha256(
        format!("AWS4{secret_access_key}").as_bytes(),
        date_stamp.as_bytes(),
    )?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, TERMINATOR.as_bytes())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> SignerResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SignerError::SigningError(format!("invalid HMAC key: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// URL the upload form posts to.
///
/// Endpoint overrides (`LocalStack`) and dotted bucket names use path-style
/// addressing; everything else uses the virtual-hosted regional endpoint.
#[must_use]
pub fn form_action_url(bucket: &str, region: &str, endpoint_url: Option<&str>) -> String {
    match endpoint_url {
        Some(endpoint) => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
        None if bucket.contains('.') => format!("https://s3.{region}.amazonaws.com/{bucket}"),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com/"),
    }
}
