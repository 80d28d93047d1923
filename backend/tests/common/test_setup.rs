use std::io;
use std::sync::{Arc, Mutex};

use aws_credential_types::{
    provider::{error::CredentialsError, future, ProvideCredentials, SharedCredentialsProvider},
    Credentials,
};
use aws_sdk_s3::{
    config::{BehaviorVersion, Region},
    Client as S3Client,
};
use axum::{Extension, Router};
use presign_backend::{
    handler::PresignHandler, routes, types::ExpiryConfig, url_signer::S3UrlSigner,
    url_signer::UrlSigner,
};

pub const TEST_REGION: &str = "ap-southeast-2";
pub const TEST_ACCESS_KEY_ID: &str = "AKIDEXAMPLE";
pub const TEST_SECRET_ACCESS_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// In-memory log sink for asserting on what the handler logged
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Subscriber writing plain-text events into this buffer
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        let buf = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn static_credentials() -> Credentials {
    Credentials::new(
        TEST_ACCESS_KEY_ID,
        TEST_SECRET_ACCESS_KEY,
        None,
        None,
        "presign-backend-tests",
    )
}

/// Credentials provider that always fails, as when no credentials are configured
#[derive(Debug)]
pub struct MissingCredentials;

impl ProvideCredentials for MissingCredentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
            "no credentials configured for test",
        )))
    }
}

/// Real S3 signer; presigning happens locally so no network or `LocalStack` is needed
pub fn s3_signer_with(
    credentials: SharedCredentialsProvider,
    endpoint_url: Option<&str>,
) -> S3UrlSigner {
    let mut builder = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials.clone());

    if let Some(endpoint) = endpoint_url {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    S3UrlSigner::new(
        Arc::new(S3Client::from_conf(builder.build())),
        credentials,
        TEST_REGION,
        endpoint_url.map(ToString::to_string),
    )
}

pub fn s3_signer() -> S3UrlSigner {
    s3_signer_with(SharedCredentialsProvider::new(static_credentials()), None)
}

pub fn unauthenticated_s3_signer() -> S3UrlSigner {
    s3_signer_with(SharedCredentialsProvider::new(MissingCredentials), None)
}

/// Handler with the default expiry configuration
pub fn presign_handler(signer: Arc<dyn UrlSigner>) -> PresignHandler {
    setup_test_env();
    PresignHandler::new(signer, ExpiryConfig::default())
}

/// Router for the local server, wired like `server::start`
pub fn test_router(signer: Arc<dyn UrlSigner>) -> Router {
    routes::handler().layer(Extension(Arc::new(presign_handler(signer))))
}
