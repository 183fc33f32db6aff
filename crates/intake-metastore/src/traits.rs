//! Metadata store abstraction trait

use async_trait::async_trait;
use intake_core::MetadataBackend;
use serde_json::{Map, Value};
use thiserror::Error;

/// Metadata store operation errors
#[derive(Debug, Error)]
pub enum MetadataStoreError {
    #[error("Invalid path: {0}")]
    InvalidKey(String),

    #[error("Authentication with metadata store failed: {0}")]
    Auth(String),

    #[error("Metadata store request failed: {0}")]
    Transport(String),

    #[error("Metadata store returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected metadata store response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while constructing a store at startup
#[derive(Debug, Error)]
pub enum MetadataStoreInitError {
    #[error("No service account credential configured (set {0})")]
    MissingCredential(String),

    #[error("Service account credential is not valid JSON: {0}")]
    InvalidCredential(String),

    #[error("Service account private key is invalid: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Result type for metadata store operations
pub type MetadataStoreResult<T> = Result<T, MetadataStoreError>;

/// Metadata store abstraction trait
///
/// Paths are `/`-separated segments without leading or trailing slashes.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Merge `fields` into the record at `path`.
    ///
    /// Each key in `fields` replaces the child of the same name; children not
    /// mentioned are left untouched.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> MetadataStoreResult<()>;

    /// Read the whole record at `path`, `None` when nothing is stored there.
    async fn get(&self, path: &str) -> MetadataStoreResult<Option<Value>>;

    /// Get the metadata backend type
    fn backend_type(&self) -> MetadataBackend;
}

/// Check a store path against the key rules of the Realtime Database.
///
/// Every segment must be non-empty and free of `.`, `$`, `#`, `[`, `]` and ASCII
/// control characters.
pub fn validate_path(path: &str) -> MetadataStoreResult<()> {
    if path.is_empty() {
        return Err(MetadataStoreError::InvalidKey("path is empty".to_string()));
    }

    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(MetadataStoreError::InvalidKey(format!(
                "path '{}' contains an empty segment",
                path
            )));
        }
        if let Some(c) = segment
            .chars()
            .find(|c| matches!(c, '.' | '$' | '#' | '[' | ']') || c.is_ascii_control())
        {
            return Err(MetadataStoreError::InvalidKey(format!(
                "path segment '{}' contains forbidden character {:?}",
                segment, c
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_record_paths() {
        assert!(validate_path("application/pending/abc-123_X").is_ok());
        assert!(validate_path("application/pending/user@example").is_ok());
    }

    #[test]
    fn rejects_forbidden_characters_and_empty_segments() {
        for path in [
            "",
            "application/pending/",
            "application//pending",
            "application/pending/a.b",
            "application/pending/$uid",
            "application/pending/a#b",
            "application/pending/[0]",
            "application/pending/a\u{7}",
        ] {
            assert!(
                matches!(validate_path(path), Err(MetadataStoreError::InvalidKey(_))),
                "expected {:?} to be rejected",
                path
            );
        }
    }
}
