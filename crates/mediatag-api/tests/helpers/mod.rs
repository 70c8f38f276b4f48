//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mediatag-api`. No external services
//! are needed: the catalog runs on the in-memory store and presigning is local.

use axum_test::TestServer;
use mediatag_api::setup::{build_state, routes};
use mediatag_core::Config;
use mediatag_db::{CatalogStore, MemoryStore};
use mediatag_storage::S3Presigner;
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;
use std::time::Duration;

pub const BUCKET: &str = "media";
pub const ENDPOINT: &str = "http://localstack:4566";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "CATALOG_STORE" => Some("memory".to_string()),
        "S3_BUCKET" => Some(BUCKET.to_string()),
        "S3_ENDPOINT" => Some(ENDPOINT.to_string()),
        "HEALTHCHECK_TIMEOUT_SECS" => Some("1".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Presigner with static credentials against a LocalStack-style endpoint.
pub fn test_presigner() -> Arc<S3Presigner> {
    let builder = AmazonS3Builder::new()
        .with_region("us-east-1")
        .with_access_key_id("test")
        .with_secret_access_key("test")
        .with_endpoint(ENDPOINT)
        .with_allow_http(true);
    Arc::new(
        S3Presigner::from_builder(builder, BUCKET.to_string(), Duration::from_secs(900))
            .expect("presigner"),
    )
}

pub fn server_with_store(store: Arc<dyn CatalogStore>) -> TestServer {
    let state = build_state(test_config(), store, test_presigner()).expect("app state");
    TestServer::new(routes::setup_routes(state)).expect("test server")
}

/// Test server plus a handle on its store, for failure injection.
pub fn setup_test_app() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (server_with_store(store.clone()), store)
}
