use axum::{Extension, Json, extract::State};

use crate::api::dto::auth::ProfileResponse;
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/user/profile`
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.auth_service.get_profile(&actor).await?;
    Ok(Json(user.into()))
}
