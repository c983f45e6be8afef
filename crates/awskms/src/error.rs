//! Error types for configuration and KMS calls.

use std::fmt;

use thiserror::Error;

use crate::options::Setting;

/// Boxed error kept as the source of a failed remote call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The remote KMS operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        })
    }
}

/// A required configuration value is missing.
///
/// Checked before any SDK client is built, so these never involve the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Region, access key or secret key variable is unset or blank.
    #[error("{setting} is required: environment variable {var} is unset or empty")]
    MissingVar {
        /// Slot that was missing.
        setting: Setting,
        /// Variable name that was consulted.
        var: String,
    },

    /// No encryption key id. `var` is the consulted variable, or `None` when
    /// an empty key id was passed to [`AwsKms::new`](crate::AwsKms::new).
    #[error("encrypt key id is missing{}", describe_var(.var))]
    MissingKeyId {
        /// Variable name that was consulted, if any.
        var: Option<String>,
    },
}

fn describe_var(var: &Option<String>) -> String {
    match var {
        Some(name) => format!(": environment variable {name} is unset or empty"),
        None => String::new(),
    }
}

/// Top-level error for everything this crate does.
#[derive(Debug, Error)]
pub enum KmsError {
    /// Configuration was incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The KMS call itself failed: auth, network, throttling, bad key and so
    /// on. The SDK error is kept unmodified as the source.
    #[error("kms {operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    /// KMS answered without the blob the operation is supposed to return.
    #[error("kms {operation} response contained no {field}")]
    EmptyResponse {
        operation: Operation,
        field: &'static str,
    },

    /// Text ciphertext was not valid standard base64.
    #[error("ciphertext is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decrypted bytes were not valid UTF-8.
    #[error("decrypted plaintext is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl KmsError {
    /// Wrap a failed remote call.
    pub fn transport(
        operation: Operation,
        source: impl Into<BoxError>,
    ) -> Self {
        KmsError::Transport {
            operation,
            source: source.into(),
        }
    }

    /// The remote operation involved, if the failure came from one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            KmsError::Transport { operation, .. } | KmsError::EmptyResponse { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }

    /// Returns `true` for missing-configuration failures.
    pub fn is_config(&self) -> bool {
        matches!(self, KmsError::Config(_))
    }
}
