//! Service-account OAuth2 access tokens.
//!
//! Signs an RS256 JWT assertion with the service-account key and exchanges
//! it at the token endpoint (`urn:ietf:params:oauth:grant-type:jwt-bearer`).
//! The resulting access token is cached until shortly before it expires.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use contato_core::{StoreError, StoreResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::credentials::ServiceAccountKey;
use crate::error::{Error, Result};

/// OAuth scopes requested for the service account.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_TTL_SECS: i64 = 3600;

/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Issues and caches access tokens for one service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cached: RwLock<Option<CachedToken>>,
    refresh_lock: Mutex<()>,
}

impl TokenProvider {
    /// Creates a provider. Fails if the private key is not a valid RSA PEM.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self> {
        let encoding_key = key
            .encoding_key()
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        Ok(Self {
            key,
            encoding_key,
            http,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// The service account this provider signs for.
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Returns a valid access token, exchanging a new assertion if needed.
    ///
    /// Concurrent callers that miss the cache wait for a single exchange.
    pub async fn access_token(&self) -> StoreResult<String> {
        if let Some(token) = self.lookup_cached() {
            return Ok(token);
        }
        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.lookup_cached() {
            return Ok(token);
        }
        self.refresh().await
    }

    fn lookup_cached(&self) -> Option<String> {
        let cache = self.cached.read().ok()?;
        let cached = cache.as_ref()?;
        if Instant::now() + EXPIRY_MARGIN >= cached.expires_at {
            return None;
        }
        Some(cached.token.clone())
    }

    /// Builds and signs the JWT assertion.
    fn assertion(&self) -> StoreResult<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| StoreError::backend_with_source("failed to sign token assertion", e))
    }

    async fn refresh(&self) -> StoreResult<String> {
        let assertion = self.assertion()?;
        tracing::debug!(client_email = %self.key.client_email, "Requesting access token");

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::backend_with_source("token request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::backend(format!(
                "token endpoint rejected assertion (HTTP {status}): {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::backend_with_source("token response parse failed", e))?;

        let expires_at = Instant::now() + Duration::from_secs(token.expires_in);
        if let Ok(mut cache) = self.cached.write() {
            *cache = Some(CachedToken {
                token: token.access_token.clone(),
                expires_at,
            });
        }

        Ok(token.access_token)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("client_email", &self.key.client_email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode_header};

    const TEST_KEY_PEM: &str = include_str!("../tests/fixtures/test_key.pem");

    // Public half of the fixture key.
    const TEST_RSA_N: &str = "ujA7O7WykvdNml1xLBT0o3Uwt0tmyI-hK3X67Doq3L9-T03JH90IYcE8AgxKd62mAv2xw0mCsrc8MsiyAQsgZjmWK2iKvgP5x2sKFTTcg6I8ETtEYNeIHbBRvIRrdCmUfgbhEw1Orjs6Vt7yqd4fGXjR4Gz5LfRMqv2-oyax08C4UmXvTdbNvNjVdRUq2NLBhmUueHG9HtzH-r6ofKvHyXt5eTmWHoOkvv5DRRXLWFEbtzQM3dJlQdl_I1ro5j9SeBuS9DS5pgpqG3-cqIc5TTW948QoJYCNO192hF2y8Y_hi4yLlpZx9_EMRv9ceJHp6zmFSuaBrgDMIUMYuU4GXw";
    const TEST_RSA_E: &str = "AQAB";

    #[derive(Debug, Deserialize)]
    struct DecodedClaims {
        iss: String,
        scope: String,
        aud: String,
        iat: i64,
        exp: i64,
    }

    fn test_key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "intake@megestao.iam.gserviceaccount.com".to_string(),
            private_key: TEST_KEY_PEM.to_string(),
            private_key_id: Some("kid-1".to_string()),
            token_uri: "https://oauth2.example.test/token".to_string(),
        }
    }

    #[test]
    fn test_assertion_claims_and_header() {
        let provider = TokenProvider::new(test_key(), reqwest::Client::new()).unwrap();
        let jwt = provider.assertion().unwrap();

        let header = decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("kid-1"));

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.example.test/token"]);
        validation.set_issuer(&["intake@megestao.iam.gserviceaccount.com"]);
        let decoding_key = DecodingKey::from_rsa_components(TEST_RSA_N, TEST_RSA_E).unwrap();
        let data = jsonwebtoken::decode::<DecodedClaims>(&jwt, &decoding_key, &validation).unwrap();

        assert_eq!(data.claims.iss, "intake@megestao.iam.gserviceaccount.com");
        assert_eq!(data.claims.aud, "https://oauth2.example.test/token");
        assert_eq!(data.claims.exp - data.claims.iat, ASSERTION_TTL_SECS);
        assert!(data.claims.scope.contains("auth/spreadsheets"));
        assert!(data.claims.scope.contains("auth/drive.file"));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let mut key = test_key();
        key.private_key = "not a pem".to_string();
        assert!(TokenProvider::new(key, reqwest::Client::new()).is_err());
    }

    #[test]
    fn test_cache_empty_until_refreshed() {
        let provider = TokenProvider::new(test_key(), reqwest::Client::new()).unwrap();
        assert!(provider.lookup_cached().is_none());

        *provider.cached.write().unwrap() = Some(CachedToken {
            token: "ya29.cached".to_string(),
            expires_at: Instant::now() + Duration::from_secs(3600),
        });
        assert_eq!(provider.lookup_cached().as_deref(), Some("ya29.cached"));
    }

    #[test]
    fn test_cache_expired_within_margin() {
        let provider = TokenProvider::new(test_key(), reqwest::Client::new()).unwrap();
        *provider.cached.write().unwrap() = Some(CachedToken {
            token: "ya29.stale".to_string(),
            expires_at: Instant::now() + Duration::from_secs(30),
        });
        assert!(provider.lookup_cached().is_none());
    }
}
