//! Multipart parsing for the document upload form

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use intake_core::{AppError, DocumentField};
use std::collections::HashMap;

/// A file part of the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Fields of one `POST /upload-documents` request.
#[derive(Debug, Default)]
pub struct DocumentUploadForm {
    pub uid: Option<String>,
    pub files: HashMap<DocumentField, UploadedFile>,
}

impl DocumentUploadForm {
    /// Non-empty uid, if one was sent.
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }

    /// Document fields absent from the form, in validation order.
    pub fn missing_fields(&self) -> Vec<DocumentField> {
        DocumentField::ALL
            .into_iter()
            .filter(|field| !self.files.contains_key(field))
            .collect()
    }

    pub fn take(&mut self, field: DocumentField) -> Option<UploadedFile> {
        self.files.remove(&field)
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
    }
}

/// Read the whole form.
///
/// A part is a file only when it carries a non-empty filename; `uid` is taken
/// from a plain text part. The first occurrence of a repeated field wins and
/// unknown fields are skipped.
pub async fn read_document_form(mut multipart: Multipart) -> Result<DocumentUploadForm, AppError> {
    let mut form = DocumentUploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty());

        match (DocumentField::from_field_name(&name), filename) {
            (Some(document), Some(filename)) => {
                let data = field.bytes().await.map_err(multipart_error)?;
                if form.files.contains_key(&document) {
                    continue;
                }
                tracing::debug!(
                    field = %document,
                    filename = %filename,
                    size_bytes = data.len(),
                    "Received document part"
                );
                form.files.insert(document, UploadedFile { filename, data });
            }
            (None, None) if name == "uid" => {
                let value = field.text().await.map_err(multipart_error)?;
                if form.uid.is_none() {
                    form.uid = Some(value);
                }
            }
            _ => {
                // Drain so the stream can advance past it.
                field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    Ok(form)
}

/// `Missing files: a, b` for the given fields.
pub fn missing_files_message(missing: &[DocumentField]) -> String {
    let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
    format!("Missing files: {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_follow_fixed_order() {
        let mut form = DocumentUploadForm::default();
        form.files.insert(
            DocumentField::StudentIdCopy,
            UploadedFile {
                filename: "id.png".to_string(),
                data: Bytes::from_static(b"png"),
            },
        );

        let missing = form.missing_fields();
        assert_eq!(
            missing,
            vec![DocumentField::PreviousResults, DocumentField::GuardianIdCopy]
        );
        assert_eq!(
            missing_files_message(&missing),
            "Missing files: previousResults, guardianIdCopy"
        );
    }

    #[test]
    fn empty_uid_counts_as_missing() {
        let form = DocumentUploadForm {
            uid: Some(String::new()),
            ..Default::default()
        };
        assert!(form.uid().is_none());
    }
}
