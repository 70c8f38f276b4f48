//! Application state shared by every handler.

use mediatag_core::Config;
use mediatag_db::CatalogStore;
use mediatag_services::MediaCatalogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: MediaCatalogService,
    /// Same store the catalog uses; probed by the health check
    pub store: Arc<dyn CatalogStore>,
    pub config: Config,
}
