use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Time-limited request descriptor that lets a client write an object directly
/// to storage. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadAuthorization {
    /// HTTP method to use (always `PUT`)
    pub method: String,
    /// Presigned URL
    pub url: String,
    /// Headers the client must send verbatim, keyed by canonical header name
    #[serde(rename = "signedHeader")]
    pub signed_headers: BTreeMap<String, Vec<String>>,
    /// Instant after which the URL is rejected by storage
    pub expires_at: DateTime<Utc>,
}
