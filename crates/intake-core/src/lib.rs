//! Intake Core Library
//!
//! This crate provides the configuration, error types, domain models and path
//! conventions shared by the storage, metadata-store and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod metadata_types;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use metadata_types::MetadataBackend;
pub use models::{DocumentField, DocumentMeta, DocumentRecordUpdate};
