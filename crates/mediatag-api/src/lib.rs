//! Mediatag API Library
//!
//! This crate provides the HTTP handlers, error rendering and application setup
//! for the media catalog.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
