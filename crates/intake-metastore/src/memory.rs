use crate::traits::{validate_path, MetadataStore, MetadataStoreResult};
use async_trait::async_trait;
use intake_core::MetadataBackend;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process metadata store with the same merge semantics as the database
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is stored at `path`.
    pub async fn insert(&self, path: &str, record: Map<String, Value>) -> MetadataStoreResult<()> {
        validate_path(path)?;
        self.records.write().await.insert(path.to_string(), record);
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for MemoryStore {
    async fn update(&self, path: &str, fields: Map<String, Value>) -> MetadataStoreResult<()> {
        validate_path(path)?;

        let mut records = self.records.write().await;
        let record = records.entry(path.to_string()).or_default();
        let count = fields.len();
        for (key, value) in fields {
            record.insert(key, value);
        }

        tracing::debug!(path = %path, fields = count, "Memory metadata record updated");
        Ok(())
    }

    async fn get(&self, path: &str) -> MetadataStoreResult<Option<Value>> {
        validate_path(path)?;

        let records = self.records.read().await;
        Ok(records
            .get(path)
            .filter(|record| !record.is_empty())
            .map(|record| Value::Object(record.clone())))
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MetadataStoreError;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn update_preserves_unrelated_children() {
        let store = MemoryStore::new();
        store
            .insert(
                "application/pending/u1",
                fields(json!({"name": "Sipho", "grade": 10})),
            )
            .await
            .unwrap();

        store
            .update(
                "application/pending/u1",
                fields(json!({"documents": {"studentIdCopy": "http://h/a.png"}})),
            )
            .await
            .unwrap();

        let record = store.get("application/pending/u1").await.unwrap().unwrap();
        assert_eq!(record["name"], "Sipho");
        assert_eq!(record["grade"], 10);
        assert_eq!(record["documents"]["studentIdCopy"], "http://h/a.png");
    }

    #[tokio::test]
    async fn update_replaces_named_children_wholesale() {
        let store = MemoryStore::new();
        let path = "application/pending/u2";

        store
            .update(path, fields(json!({"documents": {"a": 1, "b": 2}})))
            .await
            .unwrap();
        store
            .update(path, fields(json!({"documents": {"a": 3}})))
            .await
            .unwrap();

        let record = store.get(path).await.unwrap().unwrap();
        assert_eq!(record["documents"], json!({"a": 3}));
    }

    #[tokio::test]
    async fn get_unknown_path_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("application/pending/none").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_paths_are_rejected() {
        let store = MemoryStore::new();
        let result = store.update("application/pending/a$b", Map::new()).await;
        assert!(matches!(result, Err(MetadataStoreError::InvalidKey(_))));
    }
}
