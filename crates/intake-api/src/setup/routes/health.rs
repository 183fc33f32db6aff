//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub metadata_store: String,
}

/// Liveness check - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Upload directory and metadata store status.
///
/// Always 200 so a misconfigured store can still be diagnosed; `status` is
/// `degraded` when either dependency is not usable.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let storage = state.storage.clone();
    let storage_status = run_check(
        TIMEOUT,
        async move { storage.health_check().await },
        "unhealthy",
    )
    .await;

    let metadata_status = match state.metadata.store() {
        Ok(_) => "ready".to_string(),
        Err(reason) => format!("unavailable: {}", reason),
    };

    let healthy = storage_status == "healthy" && state.metadata.is_ready();
    if !healthy {
        tracing::warn!(
            storage = %storage_status,
            metadata_store = %metadata_status,
            "Health check degraded"
        );
    }

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage: storage_status,
        metadata_store: metadata_status,
    };

    (StatusCode::OK, Json(response))
}
