//! Mediatag Core Library
//!
//! This crate provides the domain models, error types and configuration that are
//! shared across all Mediatag components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod store_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use store_types::CatalogStoreKind;
