//! Configuration module
//!
//! This module provides the configuration for the API server and the catalog:
//! server settings, the catalog store connection and the object storage used for
//! upload authorizations. Everything is read from the environment (a `.env` file
//! is honored in development).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::constants::DEFAULT_PRESIGN_EXPIRY_SECS;
use crate::store_types::CatalogStoreKind;

// Common constants
const SERVER_PORT: u16 = 8080;
const HEALTHCHECK_TIMEOUT_SECS: u64 = 10;
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REGION: &str = "us-east-1";
/// S3 rejects presigned URLs valid for more than seven days.
const MAX_PRESIGN_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: String,
    pub healthcheck_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    pub base: BaseConfig,
    pub catalog_store: CatalogStoreKind,
    pub redis_url: Option<String>,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, LocalStack, ...)
    pub s3_endpoint: Option<String>,
    /// Base used to build public media URLs: `{media_endpoint_url}/{bucket}/{id}`
    pub media_endpoint_url: Url,
    pub presign_expiry_secs: u64,
}

// Redis URLs carry credentials, keep them out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base", &self.base)
            .field("catalog_store", &self.catalog_store)
            .field("redis_url", &self.redis_url.as_ref().map(|_| "<redacted>"))
            .field("s3_bucket", &self.s3_bucket)
            .field("s3_region", &self.s3_region)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("media_endpoint_url", &self.media_endpoint_url.as_str())
            .field("presign_expiry_secs", &self.presign_expiry_secs)
            .finish()
    }
}

/// Numeric variable, or `default` when unset. Unparsable values are an error.
fn parse_number<T, F>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: parse_number(&lookup, "PORT", SERVER_PORT)?,
            environment,
            log_format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "text".to_string())
                .to_lowercase(),
            healthcheck_timeout_secs: parse_number(
                &lookup,
                "HEALTHCHECK_TIMEOUT_SECS",
                HEALTHCHECK_TIMEOUT_SECS,
            )?,
            shutdown_timeout_secs: parse_number(
                &lookup,
                "SHUTDOWN_TIMEOUT_SECS",
                SHUTDOWN_TIMEOUT_SECS,
            )?,
        };

        let catalog_store = match lookup("CATALOG_STORE") {
            Some(value) => value.parse()?,
            None => CatalogStoreKind::Redis,
        };

        let s3_bucket = lookup("S3_BUCKET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set"))?;

        let s3_region = lookup("S3_REGION")
            .or_else(|| lookup("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let s3_endpoint = lookup("S3_ENDPOINT").filter(|s| !s.trim().is_empty());

        let media_endpoint = lookup("MEDIA_ENDPOINT_URL")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| s3_endpoint.clone())
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", s3_region));
        let media_endpoint_url = Url::parse(&media_endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid media endpoint URL {}: {}", media_endpoint, e))?;

        let presign_expiry_secs =
            parse_number(&lookup, "PRESIGN_EXPIRY_SECS", DEFAULT_PRESIGN_EXPIRY_SECS)?;

        Ok(Config {
            base,
            catalog_store,
            redis_url: lookup("REDIS_URL").filter(|s| !s.trim().is_empty()),
            s3_bucket,
            s3_region,
            s3_endpoint,
            media_endpoint_url,
            presign_expiry_secs,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.catalog_store == CatalogStoreKind::Redis && self.redis_url.is_none() {
            return Err(anyhow::anyhow!(
                "REDIS_URL must be set when CATALOG_STORE is redis"
            ));
        }

        if self.presign_expiry_secs == 0 || self.presign_expiry_secs > MAX_PRESIGN_EXPIRY_SECS {
            return Err(anyhow::anyhow!(
                "PRESIGN_EXPIRY_SECS must be between 1 and {}",
                MAX_PRESIGN_EXPIRY_SECS
            ));
        }

        if self.media_endpoint_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!(
                "MEDIA_ENDPOINT_URL must be an absolute http(s) URL"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }

    pub fn healthcheck_timeout(&self) -> Duration {
        Duration::from_secs(self.base.healthcheck_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.base.shutdown_timeout_secs)
    }

    pub fn catalog_store(&self) -> CatalogStoreKind {
        self.catalog_store
    }

    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref()
    }

    pub fn s3_bucket(&self) -> &str {
        &self.s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn media_endpoint_url(&self) -> &Url {
        &self.media_endpoint_url
    }

    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_secs)
    }
}
