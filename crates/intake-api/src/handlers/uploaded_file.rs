//! Serves stored documents by their stored filename. No auth.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use intake_core::AppError;
use intake_storage::StorageError;
use std::sync::Arc;

const NOT_FOUND: &str = "File not found";

/// Content type for a stored filename, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

fn is_unsafe_name(filename: &str) -> bool {
    filename.is_empty()
        || filename.split('/').any(|segment| segment == "..")
        || filename.starts_with('/')
        || filename.contains('\\')
}

fn not_found_or_storage(err: StorageError) -> HttpAppError {
    match err {
        StorageError::NotFound(_) | StorageError::InvalidKey(_) => {
            AppError::NotFound(NOT_FOUND.to_string()).into()
        }
        other => other.into(),
    }
}

#[utoipa::path(
    get,
    path = "/uploads/applications/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Stored filename returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found")
    )
)]
#[tracing::instrument(skip(state), fields(operation = "serve_uploaded_file"))]
pub async fn serve_uploaded_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    if is_unsafe_name(&filename) {
        tracing::warn!(filename = %filename, "Rejected unsafe file path");
        return Err(AppError::NotFound(NOT_FOUND.to_string()).into());
    }

    let length = state
        .storage
        .content_length(&filename)
        .await
        .map_err(not_found_or_storage)?;
    let stream = state
        .storage
        .download_stream(&filename)
        .await
        .map_err(not_found_or_storage)?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })
}
