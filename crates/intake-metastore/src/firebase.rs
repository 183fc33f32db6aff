//! Firebase Realtime Database backend over the REST API.

use crate::credentials::ServiceAccountKey;
use crate::token::TokenProvider;
use crate::traits::{
    validate_path, MetadataStore, MetadataStoreError, MetadataStoreInitError, MetadataStoreResult,
};
use async_trait::async_trait;
use intake_core::MetadataBackend;
use reqwest::{Response, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;

/// Realtime Database client authenticated as a service account
pub struct FirebaseStore {
    database_url: String,
    http: reqwest::Client,
    tokens: TokenProvider,
}

impl FirebaseStore {
    /// Create a new store
    ///
    /// # Arguments
    /// * `database_url` - Database root, e.g. `https://<project>-default-rtdb.firebaseio.com/`
    /// * `key` - Parsed service-account credential
    /// * `timeout` - Per-request timeout, token exchange included
    pub fn new(
        database_url: &str,
        key: ServiceAccountKey,
        timeout: Duration,
    ) -> Result<Self, MetadataStoreInitError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataStoreInitError::HttpClient(e.to_string()))?;

        let tokens = TokenProvider::new(key, http.clone())?;

        tracing::info!(
            database_url = %database_url,
            client_email = %tokens.client_email(),
            "Firebase metadata store initialized"
        );

        Ok(Self {
            database_url: database_url.trim_end_matches('/').to_string(),
            http,
            tokens,
        })
    }

    /// REST endpoint for a path: each segment is percent-encoded and `.json` appended.
    fn endpoint(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}.json", self.database_url, encoded.join("/"))
    }

    async fn check_status(response: Response) -> MetadataStoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(MetadataStoreError::Auth(
                format!("Database rejected credentials ({}): {}", status, message),
            )),
            _ => Err(MetadataStoreError::Backend {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl MetadataStore for FirebaseStore {
    async fn update(&self, path: &str, fields: Map<String, Value>) -> MetadataStoreResult<()> {
        validate_path(path)?;

        let token = self.tokens.access_token().await?;
        let start = std::time::Instant::now();

        let response = self
            .http
            .patch(self.endpoint(path))
            .bearer_auth(token)
            .json(&fields)
            .send()
            .await
            .map_err(|e| MetadataStoreError::Transport(e.to_string()))?;

        Self::check_status(response).await?;

        tracing::info!(
            path = %path,
            fields = fields.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Metadata record updated"
        );

        Ok(())
    }

    async fn get(&self, path: &str) -> MetadataStoreResult<Option<Value>> {
        validate_path(path)?;

        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .get(self.endpoint(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MetadataStoreError::Transport(e.to_string()))?;

        let value: Value = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| MetadataStoreError::InvalidResponse(e.to_string()))?;

        let record = present_value(value);
        tracing::debug!(path = %path, found = record.is_some(), "Metadata record read");

        Ok(record)
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Firebase
    }
}

/// Empty values (`null`, `false`, `0`, `""`, `[]`, `{}`) mean nothing is stored.
fn present_value(value: Value) -> Option<Value> {
    let empty = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    };
    (!empty).then_some(value)
}
