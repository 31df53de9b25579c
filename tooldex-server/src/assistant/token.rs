//! Service-account token provisioning
//!
//! Mints an RS256 assertion from the service-account key and exchanges it
//! at the OAuth token endpoint for a bearer token. Tokens are cached
//! in-process and refreshed shortly before expiry; concurrent first use is
//! serialized by the write lock.

use serde::Serialize;
use tokio::sync::RwLock;

use super::BackendError;
use crate::config::ServiceAccountKey;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh this many seconds before the reported expiry
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Serialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at - EXPIRY_MARGIN_SECS > now
    }
}

/// Bearer-token provider for the model service
pub struct TokenProvider {
    http: reqwest::Client,
    key: ServiceAccountKey,
    token_url: String,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, key: ServiceAccountKey) -> Self {
        Self {
            http,
            key,
            token_url: TOKEN_URL.to_string(),
            cached: RwLock::new(None),
        }
    }

    /// Get a valid bearer token, minting a new one when needed
    pub async fn bearer(&self) -> Result<String, BackendError> {
        let now = chrono::Utc::now().timestamp();

        if let Some(cached) = self.cached.read().await.as_ref()
            && cached.is_fresh(now)
        {
            return Ok(cached.token.clone());
        }

        let mut guard = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = guard.as_ref()
            && cached.is_fresh(now)
        {
            return Ok(cached.token.clone());
        }

        let assertion = self.sign_assertion(now)?;
        let resp: serde_json::Value = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await?
            .json()
            .await?;

        let token = resp["access_token"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| BackendError::Auth(format!("token exchange failed: {resp}")))?;
        let expires_in = resp["expires_in"].as_i64().unwrap_or(3600);

        *guard = Some(CachedToken {
            token: token.clone(),
            expires_at: now + expires_in,
        });
        Ok(token)
    }

    fn sign_assertion(&self, now: i64) -> Result<String, BackendError> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: SCOPE.to_string(),
            aud: self.token_url.clone(),
            iat: now,
            exp: now + 3600,
        };
        let encoding_key = jsonwebtoken::EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| BackendError::Auth(format!("invalid service-account key: {e}")))?;
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256),
            &claims,
            &encoding_key,
        )
        .map_err(|e| BackendError::Auth(format!("failed to sign assertion: {e}")))
    }
}
