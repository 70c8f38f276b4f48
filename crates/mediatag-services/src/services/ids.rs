//! Media identifier generation

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("identifier source exhausted")]
    Exhausted,

    #[error("identifier generator unavailable: {0}")]
    Unavailable(String),
}

/// Source of new media identifiers
///
/// Identifiers must be unique and sort by creation time. Generation never
/// touches the network.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, GenerationError>;
}

/// UUID version 7 identifiers (millisecond timestamp prefix, random tail)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn generate(&self) -> Result<String, GenerationError> {
        Ok(Uuid::now_v7().to_string())
    }
}
