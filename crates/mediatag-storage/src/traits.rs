//! Presigning abstraction trait

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Presign operation errors
#[derive(Debug, Error)]
pub enum PresignError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for presign operations
pub type PresignResult<T> = Result<T, PresignError>;

/// Signed HTTP request descriptor for a direct upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedRequest {
    pub method: String,
    pub url: Url,
    /// Headers covered by the signature, which the client must send unchanged
    pub signed_headers: BTreeMap<String, Vec<String>>,
    pub expires_in: Duration,
}

/// Presigning abstraction trait
///
/// Implementations only sign; they never contact the object or move bytes.
#[async_trait]
pub trait Presigner: Send + Sync {
    /// Sign a `PUT` of `key` into `bucket` with no constraints beyond bucket and key.
    async fn presign_put(&self, bucket: &str, key: &str) -> PresignResult<PresignedRequest>;
}
