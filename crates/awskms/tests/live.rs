//! Round trips against real AWS KMS.
//!
//! Each test returns early unless `AWS_KMS_REGION_ID` is set, so the suite
//! passes offline. With credentials exported:
//!
//! ```text
//! AWS_KMS_REGION_ID=us-east-1 AWS_KMS_ACCESS_KEY=... AWS_KMS_SECRET_KEY=... \
//! AWS_KMS_ENCRYPT_KEY_ID=alias/test-key cargo test -p awskms --test live
//! ```

use awskms::{
    from_env_with, ClientOptions, EnvOptions, LogFacadeLogger, LogMode, ProcessEnv, TracingLogger,
};

/// Options used by every test; the session token is read from the standard
/// `AWS_SESSION_TOKEN` variable.
fn options() -> EnvOptions {
    EnvOptions::default().with_session_token("AWS_SESSION_TOKEN")
}

fn configured(options: &EnvOptions) -> bool {
    let set = std::env::var(&options.region_id).is_ok_and(|v| !v.is_empty());
    if !set {
        eprintln!(
            "skipping: AWS KMS credentials not configured; required variables: {}",
            serde_json::to_string_pretty(options).unwrap()
        );
    }
    set
}

#[tokio::test]
async fn bytes_round_trip_with_tracing_logger() {
    let options = options();
    if !configured(&options) {
        return;
    }

    let client_options = ClientOptions::new()
        .with_logger(TracingLogger::new())
        .with_log_mode(LogMode::requests_and_responses());
    let kms = from_env_with(&options, &ProcessEnv, client_options)
        .await
        .unwrap();

    let msg = b"test message";
    let ciphertext = kms.encrypt(msg).await.unwrap();
    assert!(!ciphertext.is_empty());

    let plaintext = kms.decrypt(&ciphertext).await.unwrap();
    assert_eq!(plaintext, msg);
}

#[tokio::test]
async fn text_round_trip_with_log_facade_logger() {
    let options = options();
    if !configured(&options) {
        return;
    }

    let client_options = ClientOptions::new().with_logger(LogFacadeLogger::new());
    let kms = from_env_with(&options, &ProcessEnv, client_options)
        .await
        .unwrap();

    let ciphertext = kms.encrypt_text("hello").await.unwrap();
    assert!(!ciphertext.is_empty());
    assert_eq!(kms.decrypt_text(&ciphertext).await.unwrap(), "hello");
}

#[tokio::test]
async fn from_env_round_trip() {
    let options = options();
    if !configured(&options) {
        return;
    }

    let kms = awskms::from_env(&options).await.unwrap();
    let msg = "test message from env";
    let ciphertext = kms.encrypt_text(msg).await.unwrap();
    assert_eq!(kms.decrypt_text(&ciphertext).await.unwrap(), msg);
}
