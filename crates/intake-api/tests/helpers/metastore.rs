//! Metadata store double whose writes always fail.

use async_trait::async_trait;
use intake_core::MetadataBackend;
use intake_metastore::{MetadataStore, MetadataStoreError, MetadataStoreResult};
use serde_json::{Map, Value};

/// Upstream message carried by the error; must never reach a client.
pub const FAILING_STORE_DETAIL: &str = "Permission denied at https://intake-test.firebaseio.com";

pub struct FailingMetadataStore;

#[async_trait]
impl MetadataStore for FailingMetadataStore {
    async fn update(&self, _path: &str, _fields: Map<String, Value>) -> MetadataStoreResult<()> {
        Err(MetadataStoreError::Backend {
            status: 503,
            message: FAILING_STORE_DETAIL.to_string(),
        })
    }

    async fn get(&self, _path: &str) -> MetadataStoreResult<Option<Value>> {
        Err(MetadataStoreError::Backend {
            status: 503,
            message: FAILING_STORE_DETAIL.to_string(),
        })
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Firebase
    }
}
