use crate::traits::{PresignError, PresignResult, PresignedRequest, Presigner};
use async_trait::async_trait;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// S3 upload presigner
///
/// Signing is done locally with the configured credentials; no request is sent
/// to S3 until the client replays the URL.
#[derive(Debug, Clone)]
pub struct S3Presigner {
    builder: AmazonS3Builder,
    bucket: String,
    store: AmazonS3,
    expires_in: Duration,
}

impl S3Presigner {
    /// Create a new S3Presigner from the environment (AWS_* credentials)
    ///
    /// # Arguments
    /// * `bucket` - Default bucket, signed with a prebuilt client
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "http://localstack:4566" for LocalStack)
    /// * `expires_in` - Lifetime of every signed URL
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        expires_in: Duration,
    ) -> PresignResult<Self> {
        let mut builder = AmazonS3Builder::from_env().with_region(region);

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        Self::from_builder(builder, bucket, expires_in)
    }

    /// Create a presigner from a prepared builder (credentials, region, endpoint).
    pub fn from_builder(
        builder: AmazonS3Builder,
        bucket: String,
        expires_in: Duration,
    ) -> PresignResult<Self> {
        let store = builder
            .clone()
            .with_bucket_name(bucket.clone())
            .build()
            .map_err(|e| PresignError::ConfigError(e.to_string()))?;

        Ok(S3Presigner {
            builder,
            bucket,
            store,
            expires_in,
        })
    }

    fn store_for(&self, bucket: &str) -> PresignResult<AmazonS3> {
        if bucket == self.bucket {
            return Ok(self.store.clone());
        }

        self.builder
            .clone()
            .with_bucket_name(bucket.to_string())
            .build()
            .map_err(|e| PresignError::ConfigError(e.to_string()))
    }
}

/// Headers covered by a query-string signature: only `Host`.
fn signed_headers(url: &Url) -> BTreeMap<String, Vec<String>> {
    let mut headers = BTreeMap::new();
    if let Some(host) = url.host_str() {
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        headers.insert("Host".to_string(), vec![host]);
    }
    headers
}

fn object_path(key: &str) -> PresignResult<Path> {
    if key.is_empty() || key.starts_with('/') || key.contains("..") {
        return Err(PresignError::InvalidKey(key.to_string()));
    }
    Path::parse(key).map_err(|e| PresignError::InvalidKey(format!("{}: {}", key, e)))
}

#[async_trait]
impl Presigner for S3Presigner {
    async fn presign_put(&self, bucket: &str, key: &str) -> PresignResult<PresignedRequest> {
        let location = object_path(key)?;
        let store = self.store_for(bucket)?;
        let start = std::time::Instant::now();

        let url = store
            .signed_url(Method::PUT, &location, self.expires_in)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    "S3 presign failed"
                );
                PresignError::SigningFailed(e.to_string())
            })?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            expires_in_secs = self.expires_in.as_secs(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload presigned"
        );

        Ok(PresignedRequest {
            method: Method::PUT.to_string(),
            signed_headers: signed_headers(&url),
            url,
            expires_in: self.expires_in,
        })
    }
}
