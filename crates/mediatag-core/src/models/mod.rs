//! Data models for the catalog
//!
//! Domain records returned by the catalog service and the request/response shapes
//! exchanged with HTTP clients.

mod media;
mod tag;
mod upload;

pub use media::{CreateMediaRequest, ListMediaQuery, MediaRecord, MediaResponse};
pub use tag::{CreateTagRequest, Tag};
pub use upload::UploadAuthorization;
