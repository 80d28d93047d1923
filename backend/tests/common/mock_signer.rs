use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use presign_backend::url_signer::{SignerError, SignerResult, UploadDescriptor, UrlSigner};

/// A call recorded by [`MockSigner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerCall {
    pub bucket: String,
    pub key: String,
    pub expires_in: Duration,
}

/// In-memory signer that records every call and either succeeds or fails
pub struct MockSigner {
    fail: bool,
    stall: bool,
    get_calls: Mutex<Vec<SignerCall>>,
    upload_calls: Mutex<Vec<SignerCall>>,
}

impl MockSigner {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            stall: false,
            get_calls: Mutex::new(Vec::new()),
            upload_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    /// Never answers, like an unreachable credentials endpoint
    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::succeeding()
        }
    }

    pub fn get_calls(&self) -> Vec<SignerCall> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> Vec<SignerCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    fn record(calls: &Mutex<Vec<SignerCall>>, bucket: &str, key: &str, expires_in: Duration) {
        calls.lock().unwrap().push(SignerCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            expires_in,
        });
    }
}

#[async_trait]
impl UrlSigner for MockSigner {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> SignerResult<String> {
        Self::record(&self.get_calls, bucket, key, expires_in);

        if self.stall {
            std::future::pending::<()>().await;
        }

        if self.fail {
            return Err(SignerError::S3Error(
                "AccessDenied: User arn:aws:iam::123456789012:user/ci is not authorized".to_string(),
            ));
        }

        Ok(format!(
            "https://{bucket}.s3.ap-southeast-2.amazonaws.com/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }

    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> SignerResult<UploadDescriptor> {
        Self::record(&self.upload_calls, bucket, key, expires_in);

        if self.fail {
            return Err(SignerError::CredentialsError(
                "the credential provider was not enabled".to_string(),
            ));
        }

        Ok(UploadDescriptor {
            url: format!("https://{bucket}.s3.ap-southeast-2.amazonaws.com/"),
            fields: BTreeMap::from([
                ("key".to_string(), key.to_string()),
                ("policy".to_string(), "bW9jay1wb2xpY3k=".to_string()),
                ("x-amz-signature".to_string(), "0".repeat(64)),
            ]),
        })
    }
}
