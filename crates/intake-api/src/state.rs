//! Application state shared by all handlers.

use intake_core::Config;
use intake_metastore::MetadataStoreHandle;
use intake_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Flat directory of uploaded documents
    pub storage: Arc<dyn Storage>,
    /// Record store, or the reason it could not be initialized
    pub metadata: MetadataStoreHandle,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>, metadata: MetadataStoreHandle) -> Self {
        Self {
            config,
            storage,
            metadata,
        }
    }
}
