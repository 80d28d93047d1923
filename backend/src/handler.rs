//! Request router and signer
//!
//! Turns an invocation into a presigned download URL or upload descriptor.
//! Every outcome, including failures, leaves as a [`ResponseEnvelope`].

use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;
use tracing::instrument;

use crate::types::{
    ExpiryConfig, GetObjectRequest, HandlerError, InvocationEvent, ResponseEnvelope, SignRequest,
    UploadRequest,
};
use crate::url_signer::{UploadDescriptor, UrlSigner};

/// Success payload for presigned downloads
#[derive(Debug, Serialize)]
pub struct PresignedGetResponse {
    /// Presigned GET URL
    #[serde(rename = "PreSignedUrl")]
    pub presigned_url: String,
    /// Lifetime of the URL in seconds
    #[serde(rename = "ExpiresIn")]
    pub expires_in: String,
}

/// Success payload for presigned uploads
#[derive(Debug, Serialize)]
pub struct PresignedPostResponse {
    /// Form action URL and fields
    #[serde(flatten)]
    pub descriptor: UploadDescriptor,
    /// Lifetime of the descriptor in seconds
    #[serde(rename = "ExpiresIn")]
    pub expires_in: String,
}

/// Dispatches presign requests to the signing capability
pub struct PresignHandler {
    signer: Arc<dyn UrlSigner>,
    expiry: ExpiryConfig,
}

impl PresignHandler {
    /// Creates a handler around a signer and a fixed expiry configuration
    #[must_use]
    pub fn new(signer: Arc<dyn UrlSigner>, expiry: ExpiryConfig) -> Self {
        Self { signer, expiry }
    }

    /// Expiry configuration this handler signs with
    #[must_use]
    pub const fn expiry(&self) -> &ExpiryConfig {
        &self.expiry
    }

    /// Handles one invocation; never fails
    #[instrument(skip_all)]
    pub async fn handle(&self, event: InvocationEvent) -> ResponseEnvelope {
        let request = match Self::parse(&event) {
            Ok(request) => request,
            Err(err) => return err.into(),
        };

        tracing::debug!(method_type = %request.method_type(), "Dispatching presign request");

        match request {
            SignRequest::Get(request) => self.sign_get(&request).await,
            SignRequest::Post(request) => self.sign_post(&request).await,
        }
    }

    /// Presigns a download of `ObjectName` from `BucketName`
    #[instrument(skip(self), fields(bucket = %request.bucket_name, key = %request.object_name))]
    pub async fn sign_get(&self, request: &GetObjectRequest) -> ResponseEnvelope {
        self.try_sign_get(request)
            .await
            .unwrap_or_else(ResponseEnvelope::from)
    }

    /// Presigns an upload of `FileName` into `BucketName` under a fresh random key
    #[instrument(skip(self), fields(bucket = %request.bucket_name, file_name = %request.file_name))]
    pub async fn sign_post(&self, request: &UploadRequest) -> ResponseEnvelope {
        self.try_sign_post(request)
            .await
            .unwrap_or_else(ResponseEnvelope::from)
    }

    fn parse(event: &InvocationEvent) -> Result<SignRequest, HandlerError> {
        let body = event
            .decoded_body()
            .map_err(HandlerError::MalformedBody)?
            .ok_or(HandlerError::MissingBody)?;

        SignRequest::parse(&body)
    }

    async fn try_sign_get(
        &self,
        request: &GetObjectRequest,
    ) -> Result<ResponseEnvelope, HandlerError> {
        let presigned_url = self
            .signer
            .presign_get(
                &request.bucket_name,
                &request.object_name,
                self.expiry.get_expiry(),
            )
            .await?;

        let payload = PresignedGetResponse {
            presigned_url,
            expires_in: self.expiry.get_expires_in(),
        };

        Ok(ResponseEnvelope::json(StatusCode::OK, &payload)?)
    }

    async fn try_sign_post(&self, request: &UploadRequest) -> Result<ResponseEnvelope, HandlerError> {
        let key = object_key_for(&request.file_name);
        tracing::info!(key = %key, "Generated upload object key");

        let descriptor = self
            .signer
            .presign_upload(&request.bucket_name, &key, self.expiry.post_expiry())
            .await?;

        let payload = PresignedPostResponse {
            descriptor,
            expires_in: self.expiry.post_expires_in(),
        };

        Ok(ResponseEnvelope::json(StatusCode::OK, &payload)?)
    }
}

/// Object key for an upload: 128 random bits, hex encoded, then `_` and the file name.
///
/// The prefix keeps uploads with the same file name from overwriting each other.
#[must_use]
pub fn object_key_for(file_name: &str) -> String {
    let prefix: [u8; 16] = rand::random();
    format!("{}_{file_name}", hex::encode(prefix))
}
