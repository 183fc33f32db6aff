use crate::traits::{MetadataStore, MetadataStoreInitError};
use std::sync::Arc;

/// Outcome of metadata store initialization, shared with request handlers.
///
/// An unavailable store keeps the reason so handlers and health checks can
/// report it without retrying initialization.
#[derive(Clone)]
pub enum MetadataStoreHandle {
    Ready(Arc<dyn MetadataStore>),
    Unavailable(Arc<MetadataStoreInitError>),
}

impl MetadataStoreHandle {
    pub fn from_init(result: Result<Arc<dyn MetadataStore>, MetadataStoreInitError>) -> Self {
        match result {
            Ok(store) => MetadataStoreHandle::Ready(store),
            Err(e) => MetadataStoreHandle::Unavailable(Arc::new(e)),
        }
    }

    pub fn store(&self) -> Result<&Arc<dyn MetadataStore>, &MetadataStoreInitError> {
        match self {
            MetadataStoreHandle::Ready(store) => Ok(store),
            MetadataStoreHandle::Unavailable(e) => Err(e.as_ref()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MetadataStoreHandle::Ready(_))
    }
}

impl std::fmt::Debug for MetadataStoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataStoreHandle::Ready(store) => f
                .debug_tuple("Ready")
                .field(&store.backend_type())
                .finish(),
            MetadataStoreHandle::Unavailable(e) => {
                f.debug_tuple("Unavailable").field(&e.to_string()).finish()
            }
        }
    }
}
