//! Catalog service errors

use crate::services::ids::GenerationError;
use mediatag_core::AppError;
use mediatag_db::keys::TagDecodeError;
use mediatag_db::StoreError;
use mediatag_storage::PresignError;
use thiserror::Error;

/// Errors of the catalog operations.
///
/// Every variant names the step that failed and, for batched and listed work,
/// the position of the command or record involved.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A single store command failed
    #[error("{operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    /// One command of a write batch failed; earlier commands stay applied
    #[error("executing command {index}: {source}")]
    Command {
        index: usize,
        #[source]
        source: StoreError,
    },

    #[error("getting media record {index}: {source}")]
    RecordRead {
        index: usize,
        #[source]
        source: StoreError,
    },

    #[error("decoding media record {index}: expected a field map, got {found}")]
    RecordShape { index: usize, found: &'static str },

    #[error("decoding media record {record}: {source}")]
    TagDecode {
        record: usize,
        #[source]
        source: TagDecodeError,
    },

    #[error("presigning put object: {0}")]
    Authorization(#[from] PresignError),

    #[error("generating identifier: {0}")]
    Generation(#[from] GenerationError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| CatalogError::Store { operation, source }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::Store { .. }
            | CatalogError::Command { .. }
            | CatalogError::RecordRead { .. } => AppError::Store(message),
            CatalogError::RecordShape { .. } | CatalogError::TagDecode { .. } => {
                AppError::Decode(message)
            }
            CatalogError::Authorization(_) => AppError::Storage(message),
            CatalogError::Generation(_) => AppError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediatag_core::ErrorMetadata;

    #[test]
    fn test_messages_carry_operation_and_position() {
        let err = CatalogError::store("getting media keys from store")(StoreError::Command(
            "ERR boom".to_string(),
        ));
        assert_eq!(err.to_string(), "getting media keys from store: ERR boom");

        let err = CatalogError::Command {
            index: 3,
            source: StoreError::Command("ERR boom".to_string()),
        };
        assert_eq!(err.to_string(), "executing command 3: ERR boom");

        let err = CatalogError::RecordShape {
            index: 1,
            found: "text",
        };
        assert_eq!(
            err.to_string(),
            "decoding media record 1: expected a field map, got text"
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = CatalogError::Command {
            index: 0,
            source: StoreError::Connection("refused".to_string()),
        }
        .into();
        assert_eq!(err.error_code(), "STORE_ERROR");

        let err: AppError = CatalogError::TagDecode {
            record: 0,
            source: TagDecodeError::InvalidUtf8 { index: 2 },
        }
        .into();
        assert_eq!(err.error_code(), "DATA_CORRUPTION");

        let err: AppError =
            CatalogError::from(PresignError::SigningFailed("expired".to_string())).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");

        let err: AppError = CatalogError::from(GenerationError::Exhausted).into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
