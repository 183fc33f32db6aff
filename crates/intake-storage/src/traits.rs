//! Storage abstraction trait
//!
//! This module defines the Storage trait that storage backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file persisted by [`Storage::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Unique name the file was written under (also its storage key)
    pub stored_name: String,
    /// Number of bytes written
    pub size: u64,
}

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// Handlers work against `Arc<dyn Storage>` so the upload flow does not depend on
/// where bytes end up. Keys are the flat stored filenames described in the
/// crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under a fresh unique name derived from `original_filename`.
    async fn store(&self, original_filename: &str, data: Bytes) -> StorageResult<StoredObject>;

    /// Stream a file by its stored name
    async fn download_stream(&self, stored_name: &str) -> StorageResult<ByteStream>;

    /// Size in bytes of a stored file
    async fn content_length(&self, stored_name: &str) -> StorageResult<u64>;

    /// Verify the backend can accept writes (creating its directory if needed).
    async fn health_check(&self) -> StorageResult<()>;
}
