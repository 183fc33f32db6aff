//! Document persistence: write files to storage, then merge the record.

use crate::utils::upload::DocumentUploadForm;
use chrono::Utc;
use intake_core::constants::{has_allowed_extension, record_path};
use intake_core::{AppError, DocumentField, DocumentMeta, DocumentRecordUpdate};
use intake_metastore::MetadataStore;
use intake_storage::{public_url, Storage};
use std::collections::BTreeMap;
use std::sync::Arc;

/// URLs and metadata of the files written for one upload.
#[derive(Debug, Default)]
pub struct PersistedDocuments {
    pub documents: BTreeMap<String, String>,
    pub meta: BTreeMap<String, DocumentMeta>,
}

pub struct DocumentService {
    storage: Arc<dyn Storage>,
    store: Arc<dyn MetadataStore>,
}

impl DocumentService {
    pub fn new(storage: Arc<dyn Storage>, store: Arc<dyn MetadataStore>) -> Self {
        Self { storage, store }
    }

    /// Check and write each document field in order.
    ///
    /// Stops at the first disallowed extension; files already written stay on disk.
    pub async fn persist_files(
        &self,
        form: &mut DocumentUploadForm,
        host_url: &str,
    ) -> Result<PersistedDocuments, AppError> {
        let mut persisted = PersistedDocuments::default();

        for field in DocumentField::ALL {
            let file = form.take(field).ok_or_else(|| {
                AppError::InvalidInput(format!("Missing files: {}", field.as_str()))
            })?;

            if !has_allowed_extension(&file.filename) {
                return Err(AppError::InvalidInput(format!(
                    "Invalid file type for {}",
                    field
                )));
            }

            let stored = self
                .storage
                .store(&file.filename, file.data)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;

            let url = public_url(host_url, &stored.stored_name);
            tracing::info!(
                field = %field,
                original_name = %file.filename,
                stored_name = %stored.stored_name,
                size_bytes = stored.size,
                "Document stored"
            );

            persisted.documents.insert(field.as_str().to_string(), url);
            persisted.meta.insert(
                field.as_str().to_string(),
                DocumentMeta {
                    original_name: file.filename,
                    stored_name: stored.stored_name,
                    size: stored.size,
                },
            );
        }

        Ok(persisted)
    }

    /// Merge the document fields into the applicant's record.
    pub async fn record_upload(
        &self,
        uid: &str,
        persisted: &PersistedDocuments,
    ) -> Result<(), AppError> {
        let update = DocumentRecordUpdate::new(
            persisted.documents.clone(),
            persisted.meta.clone(),
            Utc::now(),
        );
        let path = record_path(uid);

        self.store
            .update(&path, update.into_fields()?)
            .await
            .map_err(|e| AppError::MetadataStore(e.to_string()))?;

        tracing::info!(uid = %uid, path = %path, "Document record updated");
        Ok(())
    }
}
