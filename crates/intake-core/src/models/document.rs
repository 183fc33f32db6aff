use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// The three document slots every application upload must fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentField {
    PreviousResults,
    StudentIdCopy,
    GuardianIdCopy,
}

impl DocumentField {
    /// All fields, in the order they are validated and persisted.
    pub const ALL: [DocumentField; 3] = [
        DocumentField::PreviousResults,
        DocumentField::StudentIdCopy,
        DocumentField::GuardianIdCopy,
    ];

    /// Multipart field name (also the key used in the stored record).
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentField::PreviousResults => "previousResults",
            DocumentField::StudentIdCopy => "studentIdCopy",
            DocumentField::GuardianIdCopy => "guardianIdCopy",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl Display for DocumentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Per-file bookkeeping written under `documentsMeta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Filename as sent by the client
    pub original_name: String,
    /// Sanitized, uniquely prefixed filename on disk
    pub stored_name: String,
    /// Bytes written to disk
    pub size: u64,
}

/// Fields merged into `application/pending/{uid}` after a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecordUpdate {
    pub documents: BTreeMap<String, String>,
    pub documents_meta: BTreeMap<String, DocumentMeta>,
    pub documents_uploaded_at: String,
}

impl DocumentRecordUpdate {
    pub fn new(
        documents: BTreeMap<String, String>,
        documents_meta: BTreeMap<String, DocumentMeta>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            documents,
            documents_meta,
            documents_uploaded_at: format_uploaded_at(uploaded_at),
        }
    }

    /// Top-level children to merge at the record path.
    pub fn into_fields(self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "record update serialized to non-object: {}",
                other
            ))),
        }
    }
}

/// UTC timestamp without offset, microsecond precision: `2026-10-16T09:30:12.123456`.
pub fn format_uploaded_at(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadDocumentsResponse {
    pub success: bool,
    /// Field name to public URL
    pub documents: BTreeMap<String, String>,
    /// Field name to stored-file metadata
    pub meta: BTreeMap<String, DocumentMeta>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetDocumentsResponse {
    pub success: bool,
    /// Full record stored for the uid
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}
