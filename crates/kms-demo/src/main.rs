//! `kms-demo`: round-trips data through AWS KMS using `awskms`.
//!
//! Startup sequence:
//! 1. Load and validate [`Settings`] from environment variables.
//! 2. Initialise structured logging.
//! 3. Build [`awskms::AwsKms`] from the `AWS_KMS_*` variables.
//! 4. Encrypt/decrypt raw bytes, then base64 text.

mod config;
mod telemetry;

use anyhow::{ensure, Context, Result};
use awskms::ProcessEnv;
use tracing::info;

use crate::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let settings = Settings::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: kms-demo configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&settings.log_level, settings.log_format)?;

    let env_options = settings.env_options();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        variables = %serde_json::to_string(&env_options)?,
        "kms-demo starting"
    );

    // -----------------------------------------------------------------------
    // 3. KMS client
    // -----------------------------------------------------------------------
    let kms = awskms::from_env_with(&env_options, &ProcessEnv, settings.client_options())
        .await
        .context("failed to configure KMS from environment")?;

    // -----------------------------------------------------------------------
    // 4. Round trips
    // -----------------------------------------------------------------------
    let plaintext = settings.message.as_bytes();
    let ciphertext = kms.encrypt(plaintext).await.context("bytes encrypt")?;
    info!(plaintext_bytes = plaintext.len(), ciphertext_bytes = ciphertext.len(), "encrypted bytes");

    let decrypted = kms.decrypt(&ciphertext).await.context("bytes decrypt")?;
    ensure!(decrypted == plaintext, "bytes round trip mismatch");
    info!("bytes round trip ok");

    let encoded = kms
        .encrypt_text(&settings.message)
        .await
        .context("text encrypt")?;
    info!(ciphertext = %encoded, "encrypted text");

    let decoded = kms.decrypt_text(&encoded).await.context("text decrypt")?;
    ensure!(decoded == settings.message, "text round trip mismatch");
    info!("text round trip ok");

    Ok(())
}
