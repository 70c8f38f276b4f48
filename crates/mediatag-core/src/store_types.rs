use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Catalog store backend types
///
/// `Redis` is the production backend. `Memory` keeps everything in process and is
/// meant for local development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStoreKind {
    Redis,
    Memory,
}

impl FromStr for CatalogStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CatalogStoreKind::Redis),
            "memory" => Ok(CatalogStoreKind::Memory),
            _ => Err(anyhow::anyhow!("Invalid catalog store: {}", s)),
        }
    }
}

impl Display for CatalogStoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CatalogStoreKind::Redis => write!(f, "redis"),
            CatalogStoreKind::Memory => write!(f, "memory"),
        }
    }
}
