use std::sync::Arc;

use presign_backend::{
    handler::PresignHandler,
    lambda, server,
    types::{Environment, ExpiryConfig},
    url_signer::S3UrlSigner,
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // JSON for Lambda and deployed stages (CloudWatch), regular format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_current_span(false)
            .with_ansi(false)
            .init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let aws_config = environment.aws_config().await;
    let signer = S3UrlSigner::from_sdk_config(&environment, &aws_config)?;
    let presign_handler = Arc::new(PresignHandler::new(
        Arc::new(signer),
        ExpiryConfig::from_env(),
    ));
    tracing::info!(
        get_expires_in = %presign_handler.expiry().get_expires_in(),
        post_expires_in = %presign_handler.expiry().post_expires_in(),
        "Loaded expiry configuration"
    );

    if Environment::running_in_lambda() {
        lambda::run(presign_handler)
            .await
            .map_err(|e| anyhow::anyhow!("Lambda runtime error: {e}"))
    } else {
        server::start(presign_handler).await
    }
}
