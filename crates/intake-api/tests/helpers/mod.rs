//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p intake-api`. Every app gets its own
//! temporary upload directory and an in-memory metadata store.

#![allow(dead_code)]

pub mod fixtures;
pub mod metastore;
pub mod storage;

use axum_test::TestServer;
use intake_api::setup::routes;
use intake_api::state::AppState;
use intake_core::{Config, MetadataBackend};
use intake_metastore::{MemoryStore, MetadataStoreHandle, MetadataStoreInitError};
use intake_storage::{LocalStorage, Storage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Base URL the test config advertises for stored files.
pub const PUBLIC_BASE_URL: &str = "http://files.school.test";

/// Test application: server and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub store: Option<Arc<MemoryStore>>,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// The in-memory store behind the app (panics for an unavailable store).
    pub fn store(&self) -> &MemoryStore {
        self.store.as_deref().expect("test app has no metadata store")
    }

    /// Names of files currently in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        list_files(&self.upload_dir)
    }
}

pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

pub fn create_test_config(upload_dir: &Path) -> Config {
    Config {
        upload_dir: upload_dir.to_string_lossy().to_string(),
        public_base_url: Some(PUBLIC_BASE_URL.to_string()),
        metadata_backend: MetadataBackend::Memory,
        ..Config::default()
    }
}

async fn build_app(
    config: Config,
    temp_dir: TempDir,
    upload_dir: PathBuf,
    storage: Arc<dyn Storage>,
    store: Option<Arc<MemoryStore>>,
) -> TestApp {
    let metadata = match &store {
        Some(store) => MetadataStoreHandle::Ready(store.clone()),
        None => MetadataStoreHandle::from_init(Err(MetadataStoreInitError::MissingCredential(
            "FIREBASE_SERVICE_ACCOUNT or GOOGLE_APPLICATION_CREDENTIALS_JSON".to_string(),
        ))),
    };
    build_app_with_handle(config, temp_dir, upload_dir, storage, metadata, store).await
}

async fn build_app_with_handle(
    config: Config,
    temp_dir: TempDir,
    upload_dir: PathBuf,
    storage: Arc<dyn Storage>,
    metadata: MetadataStoreHandle,
    store: Option<Arc<MemoryStore>>,
) -> TestApp {
    let state = Arc::new(AppState::new(config.clone(), storage, metadata));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        store,
        upload_dir,
        _temp_dir: temp_dir,
    }
}

/// App with local storage and a ready in-memory store.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Same as [`setup_test_app`], with a hook to adjust the config.
pub async fn setup_test_app_with(adjust: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads").join("applications");
    let mut config = create_test_config(&upload_dir);
    adjust(&mut config);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&upload_dir)
            .await
            .expect("Failed to create local storage"),
    );

    build_app(
        config,
        temp_dir,
        upload_dir,
        storage,
        Some(Arc::new(MemoryStore::new())),
    )
    .await
}

/// App whose metadata store failed to initialize (no credential).
pub async fn setup_app_without_store() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads").join("applications");
    let config = Config {
        metadata_backend: MetadataBackend::Firebase,
        ..create_test_config(&upload_dir)
    };

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&upload_dir)
            .await
            .expect("Failed to create local storage"),
    );

    build_app(config, temp_dir, upload_dir, storage, None).await
}

/// App whose storage rejects every write.
pub async fn setup_app_with_failing_storage() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads").join("applications");
    let config = create_test_config(&upload_dir);

    build_app(
        config,
        temp_dir,
        upload_dir,
        Arc::new(storage::FailingStorage),
        Some(Arc::new(MemoryStore::new())),
    )
    .await
}

/// App with local storage and a store that rejects every write.
pub async fn setup_app_with_failing_store() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads").join("applications");
    let config = create_test_config(&upload_dir);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&upload_dir)
            .await
            .expect("Failed to create local storage"),
    );
    let metadata = MetadataStoreHandle::Ready(Arc::new(metastore::FailingMetadataStore));

    build_app_with_handle(config, temp_dir, upload_dir, storage, metadata, None).await
}
