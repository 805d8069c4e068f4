//! Service-account credential file.

use std::path::Path;

use jsonwebtoken::EncodingKey;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Google's OAuth2 token endpoint, used when the key file omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The parts of a Google service-account key file this backend needs.
///
/// Other fields in the file (`project_id`, `client_id`, ...) are ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account identity, used as the JWT issuer.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// Key id, sent as the JWT `kid` when present.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Token endpoint the signed assertion is exchanged at.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parses a key file body.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The RSA signing key.
    pub fn encoding_key(&self) -> jsonwebtoken::errors::Result<EncodingKey> {
        EncodingKey::from_rsa_pem(self.private_key.as_bytes())
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Reads the credential file at `path`.
///
/// Returns `Ok(None)` when the file does not exist: the spreadsheet backend
/// then starts anyway and fails every write with
/// [`StoreError::CredentialsMissing`](contato_core::StoreError::CredentialsMissing).
/// A file that exists but cannot be read, parsed, or whose private key is
/// not a valid RSA PEM is an error.
pub fn load_credentials(path: &Path) -> Result<Option<ServiceAccountKey>> {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Service credential file not found; spreadsheet writes will fail"
        );
        return Ok(None);
    }

    let body = std::fs::read_to_string(path).map_err(|source| Error::CredentialsRead {
        path: path.to_path_buf(),
        source,
    })?;
    let key = ServiceAccountKey::from_json(&body)
        .map_err(|e| Error::invalid_credentials(path, e.to_string()))?;
    key.encoding_key()
        .map_err(|e| Error::invalid_credentials(path, format!("private_key: {e}")))?;

    tracing::info!(
        path = %path.display(),
        client_email = %key.client_email,
        "Loaded service credentials"
    );
    Ok(Some(key))
}
