//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded `Config` to a served router.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use mediatag_core::Config;
use mediatag_db::{create_store, CatalogStore};
use mediatag_services::{CatalogSettings, MediaCatalogService, UploadAuthorizer, UuidV7Generator};
use mediatag_storage::{create_presigner, Presigner};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .context("Failed to initialize telemetry")?;

    tracing::info!(
        environment = %config.environment(),
        catalog_store = %config.catalog_store(),
        bucket = %config.s3_bucket(),
        "Configuration loaded and validated successfully"
    );

    let store = create_store(&config)
        .await
        .context("Failed to initialize catalog store")?;
    let presigner = create_presigner(&config).context("Failed to initialize S3 presigner")?;

    let state = build_state(config, store, presigner)?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}

/// Wire the catalog service over an already built store and presigner.
pub fn build_state(
    config: Config,
    store: Arc<dyn CatalogStore>,
    presigner: Arc<dyn Presigner>,
) -> Result<Arc<AppState>> {
    let settings =
        CatalogSettings::from_config(&config).context("Invalid media endpoint URL")?;

    let catalog = MediaCatalogService::new(
        store.clone(),
        UploadAuthorizer::new(presigner),
        Arc::new(UuidV7Generator),
        settings,
    );

    Ok(Arc::new(AppState {
        catalog,
        store,
        config,
    }))
}
