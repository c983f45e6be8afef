//! Configuration loading and validation for the demo binary.

use anyhow::{Context, Result};
use awskms::{ClientOptions, EnvOptions, LogFacadeLogger, LogMode, TracingLogger};
use serde::Deserialize;

/// Which [`awskms::SdkLogger`] to install on the KMS client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkLoggerKind {
    None,
    Tracing,
    Log,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Validated demo configuration.
///
/// The AWS credentials themselves are read by [`awskms::from_env_with`] from
/// the `AWS_KMS_*` variables; this only covers how the demo runs.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// SDK request logger.
    #[serde(default = "default_sdk_logger")]
    pub sdk_logger: SdkLoggerKind,

    /// Include request/response bodies in SDK lines.
    #[serde(default)]
    pub sdk_log_body: bool,

    /// Alternative variable name for the session token, e.g. `AWS_SESSION_TOKEN`.
    #[serde(default)]
    pub session_token_var: Option<String>,

    /// KMS endpoint override (e.g. a local emulator).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Text to round-trip.
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}
fn default_sdk_logger() -> SdkLoggerKind {
    SdkLoggerKind::Tracing
}
fn default_message() -> String {
    "secret message".into()
}

impl Settings {
    /// Load and validate settings from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build demo configuration")?;

        let s: Settings = cfg
            .try_deserialize()
            .context("failed to deserialise demo configuration")?;

        s.validate()?;
        Ok(s)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        if let Some(var) = &self.session_token_var {
            if var.trim().is_empty() {
                anyhow::bail!("SESSION_TOKEN_VAR must not be empty when set");
            }
        }
        if let Some(url) = &self.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("ENDPOINT_URL must be an http(s) URL, got {url:?}");
            }
        }
        Ok(())
    }

    /// Variable names the library should read.
    pub fn env_options(&self) -> EnvOptions {
        match &self.session_token_var {
            Some(var) => EnvOptions::default().with_session_token(var.as_str()),
            None => EnvOptions::default(),
        }
    }

    /// Client options derived from the logger and endpoint settings.
    pub fn client_options(&self) -> ClientOptions {
        let mode = if self.sdk_log_body {
            LogMode::requests_and_responses().with_body()
        } else {
            LogMode::requests_and_responses()
        };
        let options = match self.sdk_logger {
            SdkLoggerKind::None => ClientOptions::new(),
            SdkLoggerKind::Tracing => ClientOptions::new().with_logger(TracingLogger::new()),
            SdkLoggerKind::Log => ClientOptions::new().with_logger(LogFacadeLogger::new()),
        }
        .with_log_mode(mode);

        match &self.endpoint_url {
            Some(url) => options.with_endpoint_url(url.as_str()),
            None => options,
        }
    }
}
