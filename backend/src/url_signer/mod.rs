//! Presigned URL generation against object storage
mod error;
pub mod post_policy;
mod s3;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

pub use error::{SignerError, SignerResult};
pub use s3::S3UrlSigner;

/// Browser upload form: the URL to POST to and the fields to submit with the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadDescriptor {
    /// Form action URL
    pub url: String,
    /// Form fields that must accompany the file part
    pub fields: BTreeMap<String, String>,
}

/// Capability that turns `(bucket, key, expiry)` into presigned artifacts.
///
/// Implementations only compute signatures; they never touch object data.
#[async_trait::async_trait]
pub trait UrlSigner: Send + Sync {
    /// Produces a time-limited URL that downloads `key` from `bucket`
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> SignerResult<String>;

    /// Produces an upload descriptor that lets a browser POST a file as `key` into `bucket`
    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> SignerResult<UploadDescriptor>;
}
