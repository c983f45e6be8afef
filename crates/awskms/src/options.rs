//! Names of the environment variables the bootstrap reads.
//!
//! [`EnvOptions`] holds variable *names*, not values. Nothing here touches the
//! environment; see [`crate::bootstrap`] for that.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical configuration slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// AWS region, e.g. `us-east-1`.
    Region,
    /// Static access key id.
    AccessKey,
    /// Static secret access key.
    SecretKey,
    /// Optional session token for temporary credentials.
    SessionToken,
    /// KMS key id, ARN or alias used for encryption.
    EncryptKeyId,
}

impl Setting {
    /// All slots in the order the bootstrap reads them.
    pub const ALL: [Setting; 5] = [
        Setting::Region,
        Setting::AccessKey,
        Setting::SecretKey,
        Setting::SessionToken,
        Setting::EncryptKeyId,
    ];
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Setting::Region => "region",
            Setting::AccessKey => "access key",
            Setting::SecretKey => "secret key",
            Setting::SessionToken => "session token",
            Setting::EncryptKeyId => "encrypt key id",
        })
    }
}

/// Environment variable names for each [`Setting`].
///
/// Build with [`EnvOptions::default`] and rename individual slots with the
/// `with_*` helpers, each of which returns a new value:
///
/// ```
/// let opts = awskms::EnvOptions::default().with_session_token("AWS_SESSION_TOKEN");
/// assert_eq!(opts.session_token, "AWS_SESSION_TOKEN");
/// assert_eq!(opts.region_id, "AWS_KMS_REGION_ID");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvOptions {
    /// Variable holding the AWS region.
    pub region_id: String,
    /// Variable holding the access key id.
    pub access_key_id: String,
    /// Variable holding the secret access key.
    pub secret_access_key: String,
    /// Variable holding the session token. May be unset.
    pub session_token: String,
    /// Variable holding the KMS key id used for encryption.
    pub encrypt_key_id: String,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            region_id: "AWS_KMS_REGION_ID".into(),
            access_key_id: "AWS_KMS_ACCESS_KEY".into(),
            secret_access_key: "AWS_KMS_SECRET_KEY".into(),
            session_token: "AWS_KMS_SESSION_TOKEN".into(),
            encrypt_key_id: "AWS_KMS_ENCRYPT_KEY_ID".into(),
        }
    }
}

impl EnvOptions {
    /// Options with the default `AWS_KMS_*` names.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region_id(self, name: impl Into<String>) -> Self {
        Self {
            region_id: name.into(),
            ..self
        }
    }

    pub fn with_access_key_id(self, name: impl Into<String>) -> Self {
        Self {
            access_key_id: name.into(),
            ..self
        }
    }

    pub fn with_secret_access_key(self, name: impl Into<String>) -> Self {
        Self {
            secret_access_key: name.into(),
            ..self
        }
    }

    pub fn with_session_token(self, name: impl Into<String>) -> Self {
        Self {
            session_token: name.into(),
            ..self
        }
    }

    pub fn with_encrypt_key_id(self, name: impl Into<String>) -> Self {
        Self {
            encrypt_key_id: name.into(),
            ..self
        }
    }

    /// Variable name configured for `setting`.
    pub fn var_name(&self, setting: Setting) -> &str {
        match setting {
            Setting::Region => &self.region_id,
            Setting::AccessKey => &self.access_key_id,
            Setting::SecretKey => &self.secret_access_key,
            Setting::SessionToken => &self.session_token,
            Setting::EncryptKeyId => &self.encrypt_key_id,
        }
    }
}
