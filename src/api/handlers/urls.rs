//! Handlers for URL mapping management (list, get, create, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::mapping::MappingResponse;
use crate::api::dto::message::MessageResponse;
use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::DeleteOutcome;
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Lists mappings, newest first.
///
/// # Endpoint
///
/// `GET /api/urls?page=1&page_size=25`
///
/// Public: no token required.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<MappingResponse>>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let svc = &state.shortening_service;
    let mappings = svc.list(offset, limit).await?;
    let total = svc.count().await?;

    let items = mappings
        .into_iter()
        .map(|m| {
            let short_url = svc.short_url(&m.short_code);
            MappingResponse::from_mapping(m, short_url)
        })
        .collect();

    Ok(Json(Paginated {
        items,
        total,
        page: params.page(),
        page_size: params.page_size(),
    }))
}

/// Returns one mapping with its usage stats.
///
/// # Endpoint
///
/// `GET /api/urls/{id}`
pub async fn get_url_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<MappingResponse>, AppError> {
    let svc = &state.shortening_service;
    let mapping = svc.get_details(id, Some(&actor)).await?;
    let short_url = svc.short_url(&mapping.short_code);

    Ok(Json(MappingResponse::from_mapping(mapping, short_url)))
}

/// Shortens a URL on behalf of the caller.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/some/long/path" }
/// ```
///
/// # Errors
///
/// - 400 if the URL is missing or not an absolute HTTP(S) URL
/// - 409 if the URL has already been shortened
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let svc = &state.shortening_service;
    let mapping = svc.shorten(&payload.original_url, &actor).await?;

    Ok(Json(ShortenResponse {
        short_url: svc.short_url(&mapping.short_code),
        short_code: mapping.short_code,
        original_url: mapping.original_url,
    }))
}

/// Deletes a mapping owned by the caller, or any mapping for admins.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// # Errors
///
/// - 404 if the mapping does not exist
/// - 403 if the caller may not delete it (404 when
///   `CONFLATE_DELETE_DENIAL` is set)
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    match state.shortening_service.delete_mapping(id, &actor).await? {
        DeleteOutcome::Deleted => Ok(Json(MessageResponse::new("URL deleted successfully"))),
        DeleteOutcome::NotFound => Err(url_not_found(id)),
        DeleteOutcome::Forbidden if state.conflate_delete_denial => Err(url_not_found(id)),
        DeleteOutcome::Forbidden => Err(AppError::forbidden(
            "You can only delete your own URLs",
            json!({ "id": id }),
        )),
    }
}

fn url_not_found(id: i64) -> AppError {
    AppError::not_found("URL not found", json!({ "id": id }))
}
