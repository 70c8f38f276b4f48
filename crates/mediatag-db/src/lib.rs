//! Mediatag Store Library
//!
//! This crate provides the catalog store abstraction, the key layout used to lay
//! the catalog out in a key-value/set/hash store, and the store backends.
//!
//! # Key layout
//!
//! - `tags`: set of every tag ever created
//! - `tags:{tag}`: set of media identifiers carrying `tag` (raw tag, not escaped)
//! - `media:{id}`: hash with the `name` and `tags` fields of one media item
//!
//! The `tags` field holds the tag list percent-encoded tag by tag and joined
//! with `,`, see [`keys::encode_tags`].

pub mod factory;
pub mod keys;
#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis_store;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
#[cfg(feature = "store-memory")]
pub use memory::MemoryStore;
pub use mediatag_core::CatalogStoreKind;
#[cfg(feature = "store-redis")]
pub use redis_store::RedisStore;
pub use traits::{CatalogStore, Reply, StoreCommand, StoreError, StoreResult};
