use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mediatag_core::models::{
    CreateMediaRequest, ListMediaQuery, MediaResponse, UploadAuthorization,
};
use std::sync::Arc;

/// List media carrying a tag
#[utoipa::path(
    get,
    path = "/media",
    tag = "media",
    params(ListMediaQuery),
    responses(
        (status = 200, description = "Media carrying the tag; empty for unknown tags", body = [MediaResponse]),
        (status = 500, description = "Catalog store unavailable or corrupt record", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(tag = %query.tag))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMediaQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let media: Vec<MediaResponse> = state
        .catalog
        .list_media(&query.tag)
        .await?
        .into_iter()
        .map(MediaResponse::from)
        .collect();

    Ok(Json(media))
}

/// Register a media item and get a presigned upload request for it
///
/// The object itself is uploaded by the client, straight to storage, by replaying
/// the returned method, URL and signed headers.
#[utoipa::path(
    post,
    path = "/media",
    tag = "media",
    request_body = CreateMediaRequest,
    responses(
        (status = 201, description = "Media registered", body = UploadAuthorization),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Presigning or catalog write failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(name = %request.name, tag_count = request.tags.len()))]
pub async fn create_media(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateMediaRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let authorization = state
        .catalog
        .create_media(&request.name, &request.tags)
        .await?;

    Ok((StatusCode::CREATED, Json(authorization)))
}
