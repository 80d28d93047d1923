//! S3-backed URL signer

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_s3::{error::DisplayErrorContext, presigning::PresigningConfig, Client as S3Client};
use chrono::Utc;
use tracing::instrument;

use super::post_policy::PostPolicy;
use super::{SignerError, SignerResult, UploadDescriptor, UrlSigner};
use crate::types::Environment;

/// Presigns S3 requests.
///
/// GET URLs come straight from the SDK presigner. Upload descriptors are POST
/// policies signed with credentials resolved from the same provider chain.
pub struct S3UrlSigner {
    s3_client: Arc<S3Client>,
    credentials: SharedCredentialsProvider,
    region: String,
    endpoint_url: Option<String>,
}

impl S3UrlSigner {
    /// Creates a signer from pre-configured parts
    ///
    /// # Arguments
    ///
    /// * `s3_client` - S3 client used for GET presigning
    /// * `credentials` - Provider used to sign upload policies
    /// * `region` - Region the upload policy is scoped to
    /// * `endpoint_url` - Optional endpoint override (`LocalStack`), switches uploads to path-style URLs
    #[must_use]
    pub fn new(
        s3_client: Arc<S3Client>,
        credentials: SharedCredentialsProvider,
        region: impl Into<String>,
        endpoint_url: Option<String>,
    ) -> Self {
        Self {
            s3_client,
            credentials,
            region: region.into(),
            endpoint_url,
        }
    }

    /// Builds the signer from the shared AWS SDK configuration
    ///
    /// # Errors
    ///
    /// Returns `SignerError::ConfigError` if the SDK config has no region or credentials provider
    pub fn from_sdk_config(
        environment: &Environment,
        aws_config: &SdkConfig,
    ) -> SignerResult<Self> {
        let region = aws_config
            .region()
            .map(ToString::to_string)
            .ok_or_else(|| SignerError::ConfigError("no AWS region configured".to_string()))?;

        let credentials = aws_config.credentials_provider().ok_or_else(|| {
            SignerError::ConfigError("no AWS credentials provider configured".to_string())
        })?;

        let s3_client = Arc::new(S3Client::from_conf(
            environment.s3_client_config(aws_config),
        ));

        Ok(Self::new(
            s3_client,
            credentials,
            region,
            environment.override_aws_endpoint_url().map(ToString::to_string),
        ))
    }

    fn presigning_config(expires_in: Duration) -> SignerResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in).map_err(|e| {
            SignerError::ConfigError(format!("Failed to create presigning config: {e}"))
        })
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    #[instrument(skip(self))]
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> SignerResult<String> {
        let presigned = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                SignerError::S3Error(format!(
                    "Failed to generate presigned URL: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(presigned.uri().to_string())
    }

    #[instrument(skip(self))]
    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> SignerResult<UploadDescriptor> {
        if bucket.is_empty() || key.is_empty() {
            return Err(SignerError::InvalidInput(
                "bucket and key must not be empty".to_string(),
            ));
        }

        // Validates the window the same way GET presigning does
        Self::presigning_config(expires_in)?;

        let credentials = self.credentials.provide_credentials().await?;

        PostPolicy::new(bucket, key, &self.region, expires_in).descriptor(
            &credentials,
            self.endpoint_url.as_deref(),
            Utc::now(),
        )
    }
}
