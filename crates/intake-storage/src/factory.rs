use crate::{LocalStorage, Storage, StorageResult};
use intake_core::Config;
use std::sync::Arc;

/// Create the storage backend for uploaded documents based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.upload_dir()).await?;
    Ok(Arc::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_configured_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads").join("applications");
        let config = Config {
            upload_dir: upload_dir.to_string_lossy().to_string(),
            ..Config::default()
        };

        let storage = create_storage(&config).await.unwrap();

        assert!(upload_dir.is_dir());
        assert!(storage.health_check().await.is_ok());
    }
}
