//! [`AwsKms`]: encrypt/decrypt bytes or base64 text under one KMS key.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::client::KmsApi;
use crate::error::{ConfigError, KmsError};

/// A KMS client paired with the key id used for encryption.
///
/// Immutable once built. Holds nothing but the client handle and the key id,
/// so it can be cloned (when the client can) or shared across tasks freely.
#[derive(Debug, Clone)]
pub struct AwsKms<C = aws_sdk_kms::Client> {
    client: C,
    encrypt_key_id: String,
}

impl<C: KmsApi> AwsKms<C> {
    /// Pair `client` with `encrypt_key_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKeyId`] if the key id is empty or blank,
    /// so a bad key id is reported here and not on the first encrypt.
    pub fn new(client: C, encrypt_key_id: impl Into<String>) -> Result<Self, ConfigError> {
        let encrypt_key_id = encrypt_key_id.into();
        if encrypt_key_id.trim().is_empty() {
            return Err(ConfigError::MissingKeyId { var: None });
        }
        Ok(Self {
            client,
            encrypt_key_id,
        })
    }

    /// Key id, ARN or alias used by [`encrypt`](Self::encrypt).
    pub fn key_id(&self) -> &str {
        &self.encrypt_key_id
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Encrypt `plaintext` and return the opaque ciphertext blob.
    ///
    /// # Errors
    ///
    /// Returns [`KmsError::Transport`] if the KMS call fails.
    pub async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, KmsError> {
        debug!(
            key_id = %self.encrypt_key_id,
            bytes = plaintext.len(),
            "kms encrypt"
        );
        self.client.encrypt(&self.encrypt_key_id, plaintext).await
    }

    /// Decrypt a blob previously returned by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns [`KmsError::Transport`] if the KMS call fails.
    pub async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KmsError> {
        debug!(bytes = ciphertext.len(), "kms decrypt");
        self.client.decrypt(ciphertext).await
    }

    /// Encrypt a string and return the ciphertext as standard padded base64.
    ///
    /// # Errors
    ///
    /// Same as [`encrypt`](Self::encrypt).
    pub async fn encrypt_text(&self, plaintext: &str) -> Result<String, KmsError> {
        let blob = self.encrypt(plaintext.as_bytes()).await?;
        Ok(STANDARD.encode(blob))
    }

    /// Decrypt base64 text produced by [`encrypt_text`](Self::encrypt_text).
    ///
    /// The input must be one unbroken padded base64 string. Line breaks and
    /// other whitespace are not skipped, so ciphertext that was wrapped when
    /// copied has to be joined back into one line first.
    ///
    /// # Errors
    ///
    /// Returns [`KmsError::Decode`] for malformed base64 (KMS is not called),
    /// [`KmsError::Transport`] if the KMS call fails, and [`KmsError::Utf8`]
    /// if the plaintext is not a UTF-8 string.
    pub async fn decrypt_text(&self, ciphertext: &str) -> Result<String, KmsError> {
        let blob = STANDARD.decode(ciphertext)?;
        let plaintext = self.decrypt(&blob).await?;
        Ok(String::from_utf8(plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockKmsApi;
    use crate::error::Operation;

    const KEY_ID: &str = "alias/test-key";

    /// Mock that "encrypts" by prefixing a marker and "decrypts" by stripping it.
    fn echo_client() -> MockKmsApi {
        let mut client = MockKmsApi::new();
        client
            .expect_encrypt()
            .withf(|key_id, _| key_id == KEY_ID)
            .returning(|_, plaintext| {
                let mut blob = b"ct:".to_vec();
                blob.extend_from_slice(plaintext);
                Ok(blob)
            });
        client.expect_decrypt().returning(|blob| {
            blob.strip_prefix(b"ct:".as_slice())
                .map(<[u8]>::to_vec)
                .ok_or_else(|| KmsError::transport(Operation::Decrypt, "InvalidCiphertextException"))
        });
        client
    }

    #[test]
    fn new_rejects_empty_key_id() {
        let err = AwsKms::new(MockKmsApi::new(), "").unwrap_err();
        assert_eq!(err, ConfigError::MissingKeyId { var: None });
        assert!(AwsKms::new(MockKmsApi::new(), "   ").is_err());
    }

    #[test]
    fn new_keeps_key_id() {
        let kms = AwsKms::new(MockKmsApi::new(), KEY_ID).unwrap();
        assert_eq!(kms.key_id(), KEY_ID);
    }

    #[tokio::test]
    async fn bytes_round_trip() {
        let kms = AwsKms::new(echo_client(), KEY_ID).unwrap();
        let msg = b"test message";

        let ciphertext = kms.encrypt(msg).await.unwrap();
        assert_ne!(ciphertext.as_slice(), msg.as_slice());

        let plaintext = kms.decrypt(&ciphertext).await.unwrap();
        assert_eq!(plaintext, msg);
    }

    #[tokio::test]
    async fn text_round_trip() {
        let kms = AwsKms::new(echo_client(), KEY_ID).unwrap();

        let ciphertext = kms.encrypt_text("hello").await.unwrap();
        assert!(!ciphertext.is_empty());
        assert_eq!(STANDARD.decode(&ciphertext).unwrap(), b"ct:hello");

        assert_eq!(kms.decrypt_text(&ciphertext).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn text_round_trip_non_ascii_and_empty() {
        let kms = AwsKms::new(echo_client(), KEY_ID).unwrap();
        for msg in ["", "héllo wörld", "密文 🔐"] {
            let ciphertext = kms.encrypt_text(msg).await.unwrap();
            assert_eq!(kms.decrypt_text(&ciphertext).await.unwrap(), msg);
        }
    }

    #[tokio::test]
    async fn encrypt_sends_configured_key_id() {
        let mut client = MockKmsApi::new();
        client
            .expect_encrypt()
            .withf(|key_id, plaintext| {
                key_id == "arn:aws:kms:us-east-1:111122223333:key/abc"
                    && plaintext == b"payload".as_slice()
            })
            .times(1)
            .returning(|_, _| Ok(vec![1, 2, 3]));

        let kms = AwsKms::new(client, "arn:aws:kms:us-east-1:111122223333:key/abc").unwrap();
        assert_eq!(kms.encrypt(b"payload").await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn transport_error_passes_through() {
        let mut client = MockKmsApi::new();
        client
            .expect_encrypt()
            .returning(|_, _| Err(KmsError::transport(Operation::Encrypt, "ThrottlingException")));

        let kms = AwsKms::new(client, KEY_ID).unwrap();
        let err = kms.encrypt_text("hello").await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::Encrypt));
        assert!(err.to_string().contains("ThrottlingException"));
    }

    #[tokio::test]
    async fn malformed_base64_never_reaches_client() {
        let mut client = MockKmsApi::new();
        client.expect_decrypt().never();

        let kms = AwsKms::new(client, KEY_ID).unwrap();
        let err = kms.decrypt_text("not base64!!").await.unwrap_err();
        assert!(matches!(err, KmsError::Decode(_)));
    }

    #[tokio::test]
    async fn unpadded_base64_is_rejected() {
        let mut client = MockKmsApi::new();
        client.expect_decrypt().never();

        let kms = AwsKms::new(client, KEY_ID).unwrap();
        // "aGk=" is the padded form of "hi".
        assert!(matches!(
            kms.decrypt_text("aGk").await,
            Err(KmsError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn line_wrapped_base64_is_rejected() {
        let mut client = MockKmsApi::new();
        client.expect_decrypt().never();

        let kms = AwsKms::new(client, KEY_ID).unwrap();
        let wrapped = "Y3Q6aGVs\r\nbG8=";
        assert!(matches!(
            kms.decrypt_text(wrapped).await,
            Err(KmsError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn invalid_utf8_plaintext_is_an_error() {
        let mut client = MockKmsApi::new();
        client
            .expect_decrypt()
            .returning(|_| Ok(vec![0xff, 0xfe, 0xfd]));

        let kms = AwsKms::new(client, KEY_ID).unwrap();
        let err = kms.decrypt_text(&STANDARD.encode(b"blob")).await.unwrap_err();
        assert!(matches!(err, KmsError::Utf8(_)));
    }

    #[tokio::test]
    async fn shared_across_tasks() {
        let kms = std::sync::Arc::new(AwsKms::new(echo_client(), KEY_ID).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let kms = kms.clone();
                tokio::spawn(async move {
                    let msg = format!("message {i}");
                    let ct = kms.encrypt_text(&msg).await.unwrap();
                    assert_eq!(kms.decrypt_text(&ct).await.unwrap(), msg);
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
