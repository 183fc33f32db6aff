//! Storage setup and initialization

use anyhow::{Context, Result};
use intake_core::Config;
use intake_storage::{create_storage, Storage};
use std::sync::Arc;

/// Create the upload directory; failing here aborts startup.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(upload_dir = %config.upload_dir(), "Initializing local storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize upload storage")?;
    tracing::info!("Local storage initialized successfully");
    Ok(storage)
}
