use chrono::{TimeDelta, Utc};
use mediatag_core::models::UploadAuthorization;
use mediatag_storage::{PresignError, Presigner};
use std::sync::Arc;

/// Issues time-limited write authorizations for new media objects.
///
/// Only signs; the catalog state is never touched here.
#[derive(Clone)]
pub struct UploadAuthorizer {
    presigner: Arc<dyn Presigner>,
}

impl UploadAuthorizer {
    pub fn new(presigner: Arc<dyn Presigner>) -> Self {
        Self { presigner }
    }

    #[tracing::instrument(skip(self))]
    pub async fn authorize(
        &self,
        bucket: &str,
        object_key: &str,
    ) -> Result<UploadAuthorization, PresignError> {
        let request = self.presigner.presign_put(bucket, object_key).await?;

        let lifetime = TimeDelta::from_std(request.expires_in)
            .map_err(|e| PresignError::ConfigError(format!("presign expiry: {}", e)))?;

        Ok(UploadAuthorization {
            method: request.method,
            url: request.url.to_string(),
            signed_headers: request.signed_headers,
            expires_at: Utc::now() + lifetime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FailingPresigner, StaticPresigner};

    #[tokio::test]
    async fn test_authorize_copies_presigned_request() {
        let authorizer = UploadAuthorizer::new(Arc::new(StaticPresigner::default()));
        let before = Utc::now();

        let auth = authorizer.authorize("b", "id123").await.unwrap();

        assert_eq!(auth.method, "PUT");
        assert!(auth.url.starts_with("http://localstack:4566/b/id123?"));
        assert_eq!(
            auth.signed_headers.get("Host"),
            Some(&vec!["localstack:4566".to_string()])
        );
        assert!(auth.expires_at >= before + TimeDelta::seconds(900));
        assert!(auth.expires_at <= Utc::now() + TimeDelta::seconds(900));
    }

    #[tokio::test]
    async fn test_authorize_propagates_presign_failure() {
        let authorizer = UploadAuthorizer::new(Arc::new(FailingPresigner));

        let err = authorizer.authorize("b", "id123").await.unwrap_err();
        assert!(matches!(err, PresignError::SigningFailed(_)));
    }
}
