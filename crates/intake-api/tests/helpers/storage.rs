//! Storage double that fails every operation.

use async_trait::async_trait;
use bytes::Bytes;
use intake_storage::{Storage, StorageError, StorageResult, StoredObject};

/// Path leaked in error details; must never reach a client.
pub const FAILING_STORAGE_DETAIL: &str = "No space left on device (/srv/uploads/applications)";

pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn store(&self, _original_filename: &str, _data: Bytes) -> StorageResult<StoredObject> {
        Err(StorageError::UploadFailed(FAILING_STORAGE_DETAIL.to_string()))
    }

    async fn download_stream(&self, stored_name: &str) -> StorageResult<intake_storage::traits::ByteStream> {
        Err(StorageError::NotFound(stored_name.to_string()))
    }

    async fn content_length(&self, stored_name: &str) -> StorageResult<u64> {
        Err(StorageError::NotFound(stored_name.to_string()))
    }

    async fn health_check(&self) -> StorageResult<()> {
        Err(StorageError::ConfigError(FAILING_STORAGE_DETAIL.to_string()))
    }
}
