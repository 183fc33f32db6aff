//! Document upload, lookup and file serving routes.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use intake_core::constants::UPLOADS_ROUTE_PREFIX;
use std::sync::Arc;

pub fn document_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/upload-documents",
            post(handlers::upload_documents::upload_documents),
        )
        .route(
            "/get-documents",
            get(handlers::get_documents::get_documents),
        )
        .route(
            &format!("{}/{{*filename}}", UPLOADS_ROUTE_PREFIX),
            get(handlers::uploaded_file::serve_uploaded_file),
        )
        .with_state(state)
}
