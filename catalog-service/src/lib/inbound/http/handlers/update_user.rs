use auth::Capability;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::inbound::http::middleware::require;
use crate::inbound::http::middleware::PresentedToken;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a user (raw JSON)
///
/// Name and email are replaced; an absent `is_admin` keeps the current flag.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    fn try_into_command(self, current_is_admin: bool) -> Result<UpdateIdentityCommand, IdentityError> {
        Ok(UpdateIdentityCommand {
            name: DisplayName::new(self.name)?,
            email: EmailAddress::new(self.email)?,
            is_admin: self.is_admin.unwrap_or(current_is_admin),
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(token): Extension<PresentedToken>,
    Path(id): Path<String>,
    req: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = IdentityId::from_string(&id).map_err(IdentityError::from)?;

    let caller = require(
        &state.access_policy,
        &token,
        &Capability::self_or_admin(user_id),
    )?;

    let Json(req) = req?;
    let current = state.identity_service.get_identity(user_id).await?;
    let command = req.try_into_command(current.is_admin)?;

    // Only an admin may grant or revoke the admin flag.
    if command.is_admin != current.is_admin {
        require(&state.access_policy, &token, &Capability::Admin)?;
    }

    tracing::debug!(identity_id = %user_id, caller = ?caller.subject(), "Updating identity");

    state
        .identity_service
        .update_identity(user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
