//! Environment → static credentials → KMS client → [`AwsKms`].
//!
//! Every required value is checked before the SDK config is loaded, so a
//! missing variable never costs a network round trip. All failures are
//! [`ConfigError`] values; nothing here aborts the process.

use std::fmt;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_sdk_kms::config::{Credentials, Region};
use aws_smithy_runtime_api::client::http::{HttpClient, SharedHttpClient};
use tracing::info;

use crate::env::{ProcessEnv, VarSource};
use crate::error::{ConfigError, KmsError};
use crate::kms::AwsKms;
use crate::logging::{LogMode, LoggingInterceptor, SdkLogger};
use crate::options::{EnvOptions, Setting};

/// Provider name attached to the static credentials.
const PROVIDER_NAME: &str = "AwsKmsEnvironment";

/// Client settings that do not come from the environment.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    logger: Option<Arc<dyn SdkLogger>>,
    log_mode: LogMode,
    endpoint_url: Option<String>,
    http_client: Option<SharedHttpClient>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace SDK requests through `logger`.
    pub fn with_logger(self, logger: impl SdkLogger + 'static) -> Self {
        self.with_shared_logger(Arc::new(logger))
    }

    pub fn with_shared_logger(self, logger: Arc<dyn SdkLogger>) -> Self {
        Self {
            logger: Some(logger),
            ..self
        }
    }

    /// What the logger sees. Ignored without a logger.
    pub fn with_log_mode(self, log_mode: LogMode) -> Self {
        Self { log_mode, ..self }
    }

    /// Send requests somewhere other than the regional KMS endpoint, e.g. a
    /// local emulator.
    pub fn with_endpoint_url(self, url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(url.into()),
            ..self
        }
    }

    /// Replace the SDK's default HTTPS client, e.g. with a proxying connector
    /// or a test double.
    pub fn with_http_client(self, http_client: impl HttpClient + 'static) -> Self {
        Self {
            http_client: Some(SharedHttpClient::new(http_client)),
            ..self
        }
    }

    pub fn logger(&self) -> Option<&Arc<dyn SdkLogger>> {
        self.logger.as_ref()
    }

    pub fn log_mode(&self) -> LogMode {
        self.log_mode
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn http_client(&self) -> Option<&SharedHttpClient> {
        self.http_client.as_ref()
    }
}

/// Static credential triple plus region, read once at bootstrap.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// `None` when the session-token variable is unset or empty.
    pub session_token: Option<String>,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secrets.
        f.debug_struct("StaticCredentials")
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Read credentials and key id from `vars` using the names in `options`.
///
/// Region, access key and secret key are checked in that order, then the key
/// id. The session token is optional.
///
/// # Errors
///
/// [`ConfigError::MissingVar`] for the first missing credential value,
/// [`ConfigError::MissingKeyId`] if only the key id is missing.
pub fn read_credentials(
    options: &EnvOptions,
    vars: &impl VarSource,
) -> Result<(StaticCredentials, String), ConfigError> {
    let region = required(options, vars, Setting::Region)?;
    let access_key = required(options, vars, Setting::AccessKey)?;
    let secret_key = required(options, vars, Setting::SecretKey)?;
    let session_token = lookup(options, vars, Setting::SessionToken);

    let key_var = options.var_name(Setting::EncryptKeyId);
    let key_id = lookup(options, vars, Setting::EncryptKeyId).ok_or_else(|| {
        ConfigError::MissingKeyId {
            var: Some(key_var.to_owned()),
        }
    })?;

    Ok((
        StaticCredentials {
            region,
            access_key,
            secret_key,
            session_token,
        },
        key_id,
    ))
}

/// Non-blank value of `setting`, if any.
fn lookup(options: &EnvOptions, vars: &impl VarSource, setting: Setting) -> Option<String> {
    vars.var(options.var_name(setting))
        .filter(|v| !v.trim().is_empty())
}

fn required(
    options: &EnvOptions,
    vars: &impl VarSource,
    setting: Setting,
) -> Result<String, ConfigError> {
    lookup(options, vars, setting).ok_or_else(|| ConfigError::MissingVar {
        setting,
        var: options.var_name(setting).to_owned(),
    })
}

/// Build a KMS client for `credentials.region` authenticated with the static
/// credentials.
///
/// Loading the SDK config does not contact AWS when region and credentials
/// are both explicit.
pub async fn build_client(
    credentials: StaticCredentials,
    client_options: &ClientOptions,
) -> aws_sdk_kms::Client {
    let StaticCredentials {
        region,
        access_key,
        secret_key,
        session_token,
    } = credentials;

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .credentials_provider(Credentials::new(
            access_key,
            secret_key,
            session_token,
            None,
            PROVIDER_NAME,
        ))
        .load()
        .await;

    let mut builder = aws_sdk_kms::config::Builder::from(&sdk_config);
    if let Some(url) = client_options.endpoint_url() {
        builder = builder.endpoint_url(url);
    }
    if let Some(http_client) = client_options.http_client() {
        builder = builder.http_client(http_client.clone());
    }
    if let Some(logger) = client_options.logger() {
        builder = builder.interceptor(LoggingInterceptor::new(
            logger.clone(),
            client_options.log_mode(),
        ));
    }

    aws_sdk_kms::Client::from_conf(builder.build())
}

/// [`AwsKms`] from the process environment with default [`ClientOptions`].
///
/// # Errors
///
/// Returns [`KmsError::Config`] if a required variable is missing.
pub async fn from_env(options: &EnvOptions) -> Result<AwsKms, KmsError> {
    from_env_with(options, &ProcessEnv, ClientOptions::default()).await
}

/// [`AwsKms`] from an explicit variable source and client options.
///
/// # Errors
///
/// Returns [`KmsError::Config`] if a required variable is missing.
pub async fn from_env_with(
    options: &EnvOptions,
    vars: &impl VarSource,
    client_options: ClientOptions,
) -> Result<AwsKms, KmsError> {
    let (credentials, key_id) = read_credentials(options, vars)?;
    info!(
        region = %credentials.region,
        key_id = %key_id,
        session_token = credentials.session_token.is_some(),
        "configuring kms client"
    );

    let client = build_client(credentials, &client_options).await;
    Ok(AwsKms::new(client, key_id)?)
}
