//! The two remote calls [`AwsKms`](crate::AwsKms) needs, behind a trait.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_kms::primitives::Blob;

use crate::error::{KmsError, Operation};

/// Remote KMS encrypt/decrypt.
///
/// Implemented for [`aws_sdk_kms::Client`]; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KmsApi: Send + Sync {
    /// Encrypt `plaintext` under `key_id` and return the ciphertext blob.
    async fn encrypt(&self, key_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, KmsError>;

    /// Decrypt a ciphertext blob. The service picks the key from the blob's
    /// own metadata.
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KmsError>;
}

#[async_trait]
impl KmsApi for aws_sdk_kms::Client {
    async fn encrypt(&self, key_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, KmsError> {
        let resp = aws_sdk_kms::Client::encrypt(self)
            .key_id(key_id)
            .plaintext(Blob::new(plaintext))
            .send()
            .await
            .map_err(|e| KmsError::transport(Operation::Encrypt, e))?;

        resp.ciphertext_blob()
            .map(|blob| blob.as_ref().to_vec())
            .ok_or(KmsError::EmptyResponse {
                operation: Operation::Encrypt,
                field: "CiphertextBlob",
            })
    }

    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KmsError> {
        let resp = aws_sdk_kms::Client::decrypt(self)
            .ciphertext_blob(Blob::new(ciphertext))
            .send()
            .await
            .map_err(|e| KmsError::transport(Operation::Decrypt, e))?;

        resp.plaintext()
            .map(|blob| blob.as_ref().to_vec())
            .ok_or(KmsError::EmptyResponse {
                operation: Operation::Decrypt,
                field: "Plaintext",
            })
    }
}

#[async_trait]
impl<T: KmsApi + ?Sized> KmsApi for Arc<T> {
    async fn encrypt(&self, key_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, KmsError> {
        (**self).encrypt(key_id, plaintext).await
    }

    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KmsError> {
        (**self).decrypt(ciphertext).await
    }
}
