use auth::Capability;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = IdentityId::from_string(&id).map_err(IdentityError::from)?;

    require(
        &state.access_policy,
        &token,
        &Capability::self_or_admin(user_id),
    )?;

    state
        .identity_service
        .delete_identity(user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
