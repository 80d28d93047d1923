//! Error types for URL signing operations

use aws_credential_types::provider::error::CredentialsError;
use aws_sdk_s3::error::DisplayErrorContext;
use thiserror::Error;

/// Result type for URL signing operations
pub type SignerResult<T> = Result<T, SignerError>;

/// Errors that can occur while producing presigned artifacts
#[derive(Error, Debug)]
pub enum SignerError {
    /// S3 SDK failed to presign the request
    #[error("S3 presigning error: {0}")]
    S3Error(String),

    /// Credentials could not be resolved from the provider chain
    #[error("Credentials error: {0}")]
    CredentialsError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Computing the upload policy signature failed
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<CredentialsError> for SignerError {
    fn from(error: CredentialsError) -> Self {
        Self::CredentialsError(DisplayErrorContext(&error).to_string())
    }
}
