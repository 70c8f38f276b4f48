#[cfg(feature = "storage-s3")]
use crate::S3Presigner;
#[cfg(not(feature = "storage-s3"))]
use crate::PresignError;
use crate::{PresignResult, Presigner};
use mediatag_core::Config;
use std::sync::Arc;

/// Create the upload presigner based on configuration
#[cfg(feature = "storage-s3")]
pub fn create_presigner(config: &Config) -> PresignResult<Arc<dyn Presigner>> {
    let presigner = S3Presigner::new(
        config.s3_bucket().to_string(),
        config.s3_region().to_string(),
        config.s3_endpoint().map(String::from),
        config.presign_expiry(),
    )?;

    tracing::info!(
        bucket = %config.s3_bucket(),
        region = %config.s3_region(),
        endpoint = ?config.s3_endpoint(),
        expires_in_secs = config.presign_expiry().as_secs(),
        "S3 presigner configured"
    );

    Ok(Arc::new(presigner))
}

#[cfg(not(feature = "storage-s3"))]
pub fn create_presigner(_config: &Config) -> PresignResult<Arc<dyn Presigner>> {
    Err(PresignError::ConfigError(
        "S3 presigner not available (storage-s3 feature not enabled)".to_string(),
    ))
}
