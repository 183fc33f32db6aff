//! OAuth2 access tokens for a service account (JWT bearer grant).
//!
//! A short-lived RS256 assertion signed with the service-account key is exchanged
//! at the credential's token endpoint. The resulting access token is cached until
//! shortly before it expires.

use crate::credentials::ServiceAccountKey;
use crate::traits::{MetadataStoreError, MetadataStoreInitError, MetadataStoreResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Scopes required for Realtime Database REST access.
pub const FIREBASE_SCOPES: &str =
    "https://www.googleapis.com/auth/firebase.database https://www.googleapis.com/auth/userinfo.email";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Mints and caches access tokens for one service account
pub struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cache: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    /// Fails when the private key is not a valid RSA PEM.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self, MetadataStoreInitError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| MetadataStoreInitError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self {
            key,
            encoding_key,
            http,
            cache: RwLock::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Signed assertion for the token exchange.
    pub fn sign_assertion(&self, now: DateTime<Utc>) -> MetadataStoreResult<String> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: FIREBASE_SCOPES.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| MetadataStoreError::Auth(format!("Failed to sign assertion: {}", e)))
    }

    /// Current access token, fetching a new one when the cache is empty or stale.
    pub async fn access_token(&self) -> MetadataStoreResult<String> {
        {
            let cache = self.cache.read().await;
            if let Some(token) = cache.as_ref() {
                if token.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > Utc::now() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *self.cache.write().await = Some(fresh);
        Ok(access_token)
    }

    async fn fetch_token(&self) -> MetadataStoreResult<CachedToken> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| MetadataStoreError::Transport(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataStoreError::Auth(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            MetadataStoreError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        let lifetime = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);

        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in_secs = lifetime,
            "Obtained metadata store access token"
        );

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}
