use auth::Capability;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    require(&state.access_policy, &token, &Capability::AuthenticatedAny)?;

    state
        .identity_service
        .list_identities()
        .await
        .map_err(ApiError::from)
        .map(|identities| {
            ApiSuccess::new(
                StatusCode::OK,
                identities.iter().map(UserData::from).collect(),
            )
        })
}
