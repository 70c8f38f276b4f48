use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mediatag_core::models::CreateTagRequest;
use std::sync::Arc;

/// List every known tag
#[utoipa::path(
    get,
    path = "/tags",
    tag = "tags",
    responses(
        (status = 200, description = "All tags, in no particular order", body = [String]),
        (status = 500, description = "Catalog store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_tags(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tags = state.catalog.list_tags().await?;
    Ok(Json(tags))
}

/// Create a tag; creating an existing tag succeeds
#[utoipa::path(
    post,
    path = "/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Catalog store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(tag = %request.name))]
pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateTagRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.catalog.create_tag(&request.name).await?;
    Ok(StatusCode::CREATED)
}
