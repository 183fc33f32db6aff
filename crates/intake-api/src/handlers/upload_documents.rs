use crate::error::{ErrorResponse, HttpAppError};
use crate::services::DocumentService;
use crate::state::AppState;
use crate::utils::host_url::request_host_url;
use crate::utils::upload::{missing_files_message, read_document_form, DocumentUploadForm};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{HeaderMap, Uri},
    Json,
};
use intake_core::constants::record_path;
use intake_core::models::UploadDocumentsResponse;
use intake_core::AppError;
use intake_metastore::validate_path;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/upload-documents",
    tag = "documents",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Text field `uid` and file fields `previousResults`, `studentIdCopy`, `guardianIdCopy` (pdf, jpg, jpeg or png)"
    ),
    responses(
        (status = 200, description = "Documents stored and recorded", body = UploadDocumentsResponse),
        (status = 400, description = "Missing uid, missing files or invalid file type", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Store not configured or write failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "upload_documents"))]
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadDocumentsResponse>, HttpAppError> {
    let store = state.metadata.store().map_err(HttpAppError::from)?.clone();

    // A body that is not multipart carries no form fields.
    let mut form = match multipart {
        Ok(multipart) => read_document_form(multipart).await?,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request body is not multipart");
            DocumentUploadForm::default()
        }
    };

    let uid = form
        .uid()
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidInput("Missing uid".to_string()))?;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::InvalidInput(missing_files_message(&missing)).into());
    }

    if let Err(e) = validate_path(&record_path(&uid)) {
        tracing::debug!(uid = %uid, error = %e, "Rejected uid");
        return Err(AppError::InvalidInput("Invalid uid".to_string()).into());
    }

    let host_url = request_host_url(&state.config, &headers, &uri);
    let service = DocumentService::new(state.storage.clone(), store);

    let persisted = service.persist_files(&mut form, &host_url).await?;
    service.record_upload(&uid, &persisted).await?;

    Ok(Json(UploadDocumentsResponse {
        success: true,
        documents: persisted.documents,
        meta: persisted.meta,
    }))
}
