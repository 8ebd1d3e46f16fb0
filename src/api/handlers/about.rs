//! Handlers for the About page.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::about::{AboutResponse, UpdateAboutRequest};
use crate::api::dto::message::MessageResponse;
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/about`, public.
pub async fn get_about_handler(
    State(state): State<AppState>,
) -> Result<Json<AboutResponse>, AppError> {
    let page = state.about_service.get().await?;
    Ok(Json(page.into()))
}

/// `PUT /api/about`, admins only.
///
/// # Errors
///
/// Returns 403 Forbidden for non-admin callers.
pub async fn update_about_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<UpdateAboutRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .about_service
        .update(&payload.content, &actor)
        .await?;

    Ok(Json(MessageResponse::new("About page updated successfully")))
}
