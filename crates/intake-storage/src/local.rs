use crate::keys::{sanitize_filename, unique_stored_name};
use crate::traits::{ByteStream, Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Flat directory for stored files (e.g., "uploads/applications")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a stored name to a filesystem path with security validation
    ///
    /// Stored names are flat: separators, `.`/`..` and empty names are rejected so a
    /// name can never address anything outside the base directory.
    fn key_to_path(&self, stored_name: &str) -> StorageResult<PathBuf> {
        if stored_name.is_empty()
            || stored_name == "."
            || stored_name == ".."
            || stored_name.contains('/')
            || stored_name.contains('\\')
            || stored_name.contains('\0')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let path = self.base_path.join(stored_name);

        if let Ok(canonical) = path.canonicalize() {
            let base_canonical = self.base_path.canonicalize().map_err(|e| {
                StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
            })?;
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// The directory may vanish on ephemeral filesystems; recreate it before writes.
    async fn ensure_base_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn require_existing(&self, stored_name: &str) -> StorageResult<PathBuf> {
        let path = self.key_to_path(stored_name)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(StorageError::NotFound(stored_name.to_string())),
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, original_filename: &str, data: Bytes) -> StorageResult<StoredObject> {
        let stored_name = unique_stored_name(&sanitize_filename(original_filename));
        let path = self.key_to_path(&stored_name)?;

        self.ensure_base_dir().await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let size = data.len() as u64;

        tracing::info!(
            path = %path.display(),
            stored_name = %stored_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredObject { stored_name, size })
    }

    async fn download_stream(&self, stored_name: &str) -> StorageResult<ByteStream> {
        let path = self.require_existing(stored_name).await?;
        let start = std::time::Instant::now();

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let reader = tokio_util::io::ReaderStream::new(file);

        let key = stored_name.to_string();
        let path_display = path.display().to_string();
        let stream = reader.map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage stream download error"
                );
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn content_length(&self, stored_name: &str) -> StorageResult<u64> {
        let path = self.require_existing(stored_name).await?;
        let meta = fs::metadata(&path).await?;
        Ok(meta.len())
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.ensure_base_dir().await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Storage directory {} unavailable: {}",
                self.base_path.display(),
                e
            ))
        })
    }
}
