//! Mediatag Services Layer
//!
//! This crate is the **catalog service layer**: it owns the consistency
//! contract between the tag index and the media records, and coordinates the
//! store, the presigner and the identifier generator. Keep thin HTTP handling in
//! mediatag-api.

pub mod error;
pub mod services;

pub use error::{CatalogError, CatalogResult};
pub use mediatag_db::{create_store, CatalogStore, StoreError};
pub use mediatag_storage::{create_presigner, PresignError, Presigner};
pub use services::catalog::{CatalogSettings, MediaCatalogService};
pub use services::ids::{GenerationError, IdGenerator, UuidV7Generator};
pub use services::upload::UploadAuthorizer;
