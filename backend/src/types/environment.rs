//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{
    meta::region::RegionProviderChain, retry::RetryConfig, timeout::TimeoutConfig,
    BehaviorVersion, SdkConfig,
};
use tracing::Level;

/// Region used when neither `AWS_REGION` nor the profile chain provides one
pub const DEFAULT_AWS_REGION: &str = "ap-southeast-2";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable.
    ///
    /// Without `APP_ENV`, a process started by the Lambda runtime is treated as
    /// production; anything else defaults to development.
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let default = if Self::running_in_lambda() {
            "production"
        } else {
            "development"
        };
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| default.to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether the process was started by the AWS Lambda runtime
    #[must_use]
    pub fn running_in_lambda() -> bool {
        env::var_os("AWS_LAMBDA_RUNTIME_API").is_some()
    }

    /// Whether logs should be emitted as JSON lines
    #[must_use]
    pub fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging) || Self::running_in_lambda()
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// Port the local HTTP server binds to
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    pub fn port() -> Result<u16, std::num::ParseIntError> {
        env::var("PORT").map_or(Ok(8001), |p| p.parse())
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let region = RegionProviderChain::default_provider().or_else(DEFAULT_AWS_REGION);

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration derived from the shared SDK config
    #[must_use]
    pub fn s3_client_config(&self, aws_config: &SdkConfig) -> aws_sdk_s3::Config {
        let s3_config: aws_sdk_s3::Config = aws_config.into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        env::remove_var("APP_ENV");
        env::remove_var("AWS_LAMBDA_RUNTIME_API");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::set_var("APP_ENV", " Staging ");
        assert_eq!(Environment::from_env(), Environment::Staging);

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    fn test_lambda_defaults_to_production() {
        env::remove_var("APP_ENV");
        env::set_var("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001");

        let environment = Environment::from_env();
        assert_eq!(environment, Environment::Production);
        assert_eq!(environment.override_aws_endpoint_url(), None);

        // An explicit stage still wins inside Lambda
        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::remove_var("APP_ENV");
        env::remove_var("AWS_LAMBDA_RUNTIME_API");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    fn test_localstack_endpoint_only_in_development() {
        assert_eq!(
            Environment::Development.override_aws_endpoint_url(),
            Some("http://localhost:4566")
        );
        assert_eq!(Environment::Staging.override_aws_endpoint_url(), None);
        assert_eq!(Environment::Production.override_aws_endpoint_url(), None);
    }

    #[test]
    #[serial]
    fn test_port_defaults_and_parses() {
        env::remove_var("PORT");
        assert_eq!(Environment::port(), Ok(8001));

        env::set_var("PORT", "9090");
        assert_eq!(Environment::port(), Ok(9090));

        env::set_var("PORT", "not-a-port");
        assert!(Environment::port().is_err());

        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_tracing_level_override() {
        env::remove_var("TRACING_LEVEL");
        assert_eq!(Environment::Production.tracing_level(), Level::INFO);
        assert_eq!(Environment::Development.tracing_level(), Level::DEBUG);

        env::set_var("TRACING_LEVEL", "warn");
        assert_eq!(Environment::Production.tracing_level(), Level::WARN);

        env::remove_var("TRACING_LEVEL");
    }
}
