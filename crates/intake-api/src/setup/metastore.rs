//! Metadata store setup

use intake_core::Config;
use intake_metastore::{create_metadata_store, MetadataStoreHandle};

/// Build the metadata store. Never fails: a bad credential leaves the
/// handle unavailable and the data endpoints answer 500 until it is fixed.
pub fn setup_metadata_store(config: &Config) -> MetadataStoreHandle {
    let handle = MetadataStoreHandle::from_init(create_metadata_store(config));

    match handle.store() {
        Ok(store) => tracing::info!(
            backend = %store.backend_type(),
            "Metadata store initialized successfully"
        ),
        Err(reason) => tracing::error!(
            error = %reason,
            "Metadata store unavailable; upload and lookup requests will fail"
        ),
    }

    handle
}
