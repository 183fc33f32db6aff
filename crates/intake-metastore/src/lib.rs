//! Intake Metadata Store Library
//!
//! Client side of the external key-value document database that holds the
//! per-applicant document records. Records are addressed by hierarchical paths
//! such as `application/pending/{uid}`; writes merge children into the record at
//! a path and reads return the whole subtree.
//!
//! Two backends implement [`MetadataStore`]:
//!
//! - [`FirebaseStore`]: Firebase Realtime Database over its REST API,
//!   authenticated with a service-account credential.
//! - [`MemoryStore`]: in-process map with the same merge semantics, for local
//!   development and tests.
//!
//! Construction goes through [`create_metadata_store`], which returns either a
//! usable store or a typed [`MetadataStoreInitError`]. Callers wrap that result
//! in a [`MetadataStoreHandle`] so a misconfigured store degrades request
//! handling instead of stopping the process.

pub mod credentials;
pub mod factory;
pub mod firebase;
pub mod handle;
pub mod memory;
pub mod token;
pub mod traits;

// Re-export commonly used types
pub use credentials::ServiceAccountKey;
pub use factory::create_metadata_store;
pub use firebase::FirebaseStore;
pub use handle::MetadataStoreHandle;
pub use memory::MemoryStore;
pub use traits::{
    validate_path, MetadataStore, MetadataStoreError, MetadataStoreInitError,
    MetadataStoreResult,
};
