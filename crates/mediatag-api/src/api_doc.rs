//! OpenAPI documentation, served at `/api-docs/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;
use mediatag_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mediatag API",
        version = "0.1.0",
        description = "Tag-indexed media catalog. Media are registered with a name and tags; the response carries a presigned request the client uses to upload the object straight to S3."
    ),
    paths(
        handlers::tags::list_tags,
        handlers::tags::create_tag,
        handlers::media::list_media,
        handlers::media::create_media,
        health::health_check,
    ),
    components(schemas(
        models::CreateTagRequest,
        models::CreateMediaRequest,
        models::MediaResponse,
        models::UploadAuthorization,
        error::ErrorResponse,
        health::HealthCheckResponse,
    )),
    tags(
        (name = "tags", description = "Tag management"),
        (name = "media", description = "Media registration and lookup"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
