use crate::credentials::ServiceAccountKey;
use crate::firebase::FirebaseStore;
use crate::memory::MemoryStore;
use crate::traits::{MetadataStore, MetadataStoreInitError};
use intake_core::config::SERVICE_ACCOUNT_ENV_VARS;
use intake_core::{Config, MetadataBackend};
use std::sync::Arc;
use std::time::Duration;

/// Create a metadata store based on configuration
pub fn create_metadata_store(
    config: &Config,
) -> Result<Arc<dyn MetadataStore>, MetadataStoreInitError> {
    match config.metadata_backend() {
        MetadataBackend::Memory => {
            tracing::warn!("Using in-memory metadata store; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        MetadataBackend::Firebase => {
            let raw = config.firebase_service_account().ok_or_else(|| {
                MetadataStoreInitError::MissingCredential(SERVICE_ACCOUNT_ENV_VARS.join(" or "))
            })?;
            let key = ServiceAccountKey::from_json(raw)?;

            let store = FirebaseStore::new(
                config.firebase_database_url(),
                key,
                Duration::from_secs(config.metadata_store_timeout_secs()),
            )?;
            Ok(Arc::new(store))
        }
    }
}
