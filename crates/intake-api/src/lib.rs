//! Intake API Library
//!
//! This crate provides the HTTP handlers and application setup for the
//! applicant document intake service.

// Module declarations
mod api_doc;
mod handlers;
mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
