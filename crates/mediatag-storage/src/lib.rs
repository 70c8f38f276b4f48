//! Mediatag Storage Library
//!
//! The catalog never moves object bytes itself. This crate provides the
//! `Presigner` trait, which turns a bucket and object key into a time-limited
//! upload request a client can replay against object storage, and its S3
//! implementation.
//!
//! Object keys are the media identifiers themselves, stored at the bucket root.

pub mod factory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_presigner;
#[cfg(feature = "storage-s3")]
pub use s3::S3Presigner;
pub use traits::{PresignError, PresignResult, PresignedRequest, Presigner};
