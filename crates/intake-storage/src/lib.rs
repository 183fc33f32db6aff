//! Intake Storage Library
//!
//! This crate provides the file storage abstraction and the local filesystem
//! implementation used for uploaded application documents.
//!
//! # Stored filename format
//!
//! Files live in one flat directory. Every stored name is
//! `{millis_since_epoch}_{random_hex}_{sanitized_original}` so repeated uploads of
//! the same original filename never overwrite each other. Names never contain
//! path separators. Name generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{public_url, sanitize_filename, unique_stored_name};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
