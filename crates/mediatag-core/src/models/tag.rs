use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Free-form tag label. Case and whitespace are significant.
pub type Tag = String;

/// Longest tag name accepted over HTTP, in characters
pub const MAX_TAG_LENGTH: usize = 255;

/// Request to register a tag in the global tag set
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateTagRequest {
    /// Tag name
    #[validate(length(
        min = 1,
        max = 255,
        message = "Tag name must be between 1 and 255 characters"
    ))]
    pub name: String,
}
