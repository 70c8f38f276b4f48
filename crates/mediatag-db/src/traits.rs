//! Catalog store abstraction
//!
//! This module defines the `CatalogStore` trait that every store backend must
//! implement. The trait exposes only the capabilities the catalog needs: set
//! add/members, hash write/read and a pipelined batch. A key that was never
//! written reads back as an empty set or an empty field map, so callers never
//! need to tell "missing" from "empty".

use crate::CatalogStoreKind;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),

    /// The store rejected the command (e.g. WRONGTYPE)
    #[error("{0}")]
    Command(String),

    #[error("unexpected store reply: {0}")]
    UnexpectedReply(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-neutral reply shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nil,
    Integer(i64),
    Text(String),
    List(Vec<String>),
    /// Field/value pairs of a hash, in store order
    Fields(Vec<(String, String)>),
}

impl Reply {
    /// Short name of the reply shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Integer(_) => "integer",
            Reply::Text(_) => "text",
            Reply::List(_) => "list",
            Reply::Fields(_) => "field map",
        }
    }

    /// Consume the reply as a field map, or give it back if it is not one
    pub fn into_fields(self) -> Result<HashMap<String, String>, Reply> {
        match self {
            Reply::Fields(pairs) => Ok(pairs.into_iter().collect()),
            other => Err(other),
        }
    }
}

/// One command of a pipelined batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    SetAdd {
        key: String,
        member: String,
    },
    HashSet {
        key: String,
        fields: Vec<(String, String)>,
    },
    HashGetAll {
        key: String,
    },
}

impl StoreCommand {
    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::SetAdd { .. } => "SADD",
            StoreCommand::HashSet { .. } => "HSET",
            StoreCommand::HashGetAll { .. } => "HGETALL",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            StoreCommand::SetAdd { key, .. }
            | StoreCommand::HashSet { key, .. }
            | StoreCommand::HashGetAll { key } => key,
        }
    }
}

/// Catalog store abstraction trait
///
/// Implementations must be safe to share across request tasks. Each single
/// command is atomic on the store side; `execute_batch` gives no guarantee
/// across commands.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Add `member` to the set at `key`. Adding an existing member succeeds.
    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()>;

    /// All members of the set at `key`; empty when the key does not exist.
    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Write `fields` into the hash at `key`, creating it if needed.
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()>;

    /// Read the whole hash at `key`.
    ///
    /// The reply is returned undecoded so callers can reject values of the
    /// wrong shape themselves.
    async fn hash_get_all(&self, key: &str) -> StoreResult<Reply>;

    /// Send `commands` in one round trip without a transaction.
    ///
    /// The outer error means the round trip itself failed. Otherwise the returned
    /// vector is position-aligned with `commands` and carries each command's own
    /// outcome; commands that succeeded stay applied even if others failed.
    async fn execute_batch(
        &self,
        commands: Vec<StoreCommand>,
    ) -> StoreResult<Vec<StoreResult<Reply>>>;

    /// Round-trip check used by health probes
    async fn ping(&self) -> StoreResult<()>;

    /// Get the store backend type
    fn backend_type(&self) -> CatalogStoreKind;
}
