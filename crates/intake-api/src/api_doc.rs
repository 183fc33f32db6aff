//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use intake_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "Applicant document intake: upload the three required documents for a uid, look up the stored record, and download stored files."
    ),
    paths(
        handlers::upload_documents::upload_documents,
        handlers::get_documents::get_documents,
        handlers::uploaded_file::serve_uploaded_file,
    ),
    components(
        schemas(
            models::UploadDocumentsResponse,
            models::GetDocumentsResponse,
            models::DocumentMeta,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "documents", description = "Document upload and record lookup"),
        (name = "files", description = "Stored file download")
    )
)]
pub struct ApiDoc;
