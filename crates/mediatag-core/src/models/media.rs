use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::tag::{Tag, MAX_TAG_LENGTH};

/// Catalogued media item as decoded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    /// Media identifier (also the object key in the bucket)
    pub id: String,
    pub name: String,
    /// Public location of the object: `{endpoint}/{bucket}/{id}`
    pub url: Url,
    /// Tags in the order they were supplied at creation
    pub tags: Vec<Tag>,
}

/// Media item as returned to HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaResponse {
    pub name: String,
    pub url: String,
    pub tags: Vec<Tag>,
}

impl From<MediaRecord> for MediaResponse {
    fn from(record: MediaRecord) -> Self {
        MediaResponse {
            name: record.name,
            url: record.url.to_string(),
            tags: record.tags,
        }
    }
}

/// Request to create a media item and obtain an upload authorization
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateMediaRequest {
    /// Display name
    #[validate(length(
        min = 1,
        max = 255,
        message = "Media name must be between 1 and 255 characters"
    ))]
    pub name: String,
    /// Tags to attach; unknown tags are created implicitly
    #[validate(
        length(min = 1, message = "At least one tag is required"),
        custom(function = "validate_tag_names")
    )]
    pub tags: Vec<Tag>,
}

/// Every tag follows the same length rule as `CreateTagRequest::name`.
fn validate_tag_names(tags: &[Tag]) -> Result<(), ValidationError> {
    let valid = tags
        .iter()
        .all(|tag| (1..=MAX_TAG_LENGTH).contains(&tag.chars().count()));
    if valid {
        return Ok(());
    }

    Err(ValidationError::new("tag_length")
        .with_message("Tag names must be between 1 and 255 characters".into()))
}

/// Query parameters for listing media
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMediaQuery {
    /// Only media carrying this tag are returned
    #[serde(default)]
    pub tag: Tag,
}
