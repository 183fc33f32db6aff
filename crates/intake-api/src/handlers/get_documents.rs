use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use intake_core::constants::record_path;
use intake_core::models::GetDocumentsResponse;
use intake_core::AppError;
use intake_metastore::validate_path;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct GetDocumentsQuery {
    pub uid: Option<String>,
}

#[utoipa::path(
    get,
    path = "/get-documents",
    tag = "documents",
    params(
        ("uid" = String, Query, description = "Applicant identifier")
    ),
    responses(
        (status = 200, description = "Stored record for the uid", body = GetDocumentsResponse),
        (status = 400, description = "Missing uid", body = ErrorResponse),
        (status = 404, description = "No documents found", body = ErrorResponse),
        (status = 500, description = "Store not configured or read failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "get_documents"))]
pub async fn get_documents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetDocumentsQuery>,
) -> Result<Json<GetDocumentsResponse>, HttpAppError> {
    let store = state.metadata.store().map_err(HttpAppError::from)?;

    let uid = query
        .uid
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing uid".to_string()))?;

    let path = record_path(&uid);
    if let Err(e) = validate_path(&path) {
        tracing::debug!(uid = %uid, error = %e, "Rejected uid");
        return Err(AppError::InvalidInput("Invalid uid".to_string()).into());
    }

    let record = store
        .get(&path)
        .await?
        .ok_or_else(|| AppError::NotFound("No documents found".to_string()))?;

    Ok(Json(GetDocumentsResponse {
        success: true,
        data: record,
    }))
}
