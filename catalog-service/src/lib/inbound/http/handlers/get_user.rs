use auth::Capability;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id =
        IdentityId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    require(
        &state.access_policy,
        &token,
        &Capability::self_or_admin(user_id),
    )?;

    state
        .identity_service
        .get_identity(user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
