//! Thin AWS KMS wrapper: credentials, region and key id come from environment
//! variables, and the resulting [`AwsKms`] forwards encrypt/decrypt calls to the
//! remote service.
//!
//! ```no_run
//! # async fn demo() -> Result<(), awskms::KmsError> {
//! let kms = awskms::from_env(&awskms::EnvOptions::default()).await?;
//! let ciphertext = kms.encrypt_text("hello").await?;
//! assert_eq!(kms.decrypt_text(&ciphertext).await?, "hello");
//! # Ok(())
//! # }
//! ```
//!
//! No cryptography happens locally. Signing, transport and retries belong to
//! `aws-sdk-kms`.

pub mod bootstrap;
pub mod client;
pub mod env;
pub mod error;
pub mod kms;
pub mod logging;
pub mod options;

pub use bootstrap::{from_env, from_env_with, ClientOptions};
pub use client::KmsApi;
pub use env::{ProcessEnv, VarSource};
pub use error::{ConfigError, KmsError, Operation};
pub use kms::AwsKms;
pub use logging::{Classification, LogFacadeLogger, LogMode, SdkLogger, TracingLogger};
pub use options::{EnvOptions, Setting};
